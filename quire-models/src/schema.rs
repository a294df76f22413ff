table! {
    likes (id) {
        id -> Int4,
        user_id -> Int4,
        post_id -> Int4,
        creation_date -> Timestamp,
    }
}

table! {
    post_images (id) {
        id -> Int4,
        post_id -> Int4,
        url -> Varchar,
        alt_text -> Varchar,
    }
}

table! {
    post_tags (id) {
        id -> Int4,
        post_id -> Int4,
        tag_id -> Int4,
    }
}

table! {
    posts (id) {
        id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        slug -> Varchar,
        content -> Text,
        source -> Text,
        display_type -> Varchar,
        post_link -> Nullable<Varchar>,
        published -> Bool,
        likes_count -> Int4,
        creation_date -> Timestamp,
    }
}

table! {
    tags (id) {
        id -> Int4,
        tag_value -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        display_name -> Varchar,
        hashed_password -> Nullable<Text>,
        creation_date -> Timestamp,
    }
}

joinable!(likes -> posts (post_id));
joinable!(likes -> users (user_id));
joinable!(post_images -> posts (post_id));
joinable!(post_tags -> posts (post_id));
joinable!(post_tags -> tags (tag_id));
joinable!(posts -> users (user_id));

allow_tables_to_appear_in_same_query!(likes, post_images, post_tags, posts, tags, users,);
