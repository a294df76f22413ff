use clap::{App, Arg, ArgMatches, SubCommand};

use quire_models::{
    post_images::{NewPostImage, PostImage},
    posts::{NewPost, Post, PostDisplayType},
    users::User,
    Connection,
};

pub fn command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("posts")
        .about("Manage posts")
        .subcommand(
            SubCommand::with_name("new")
                .arg(
                    Arg::with_name("author")
                        .short("a")
                        .long("author")
                        .takes_value(true)
                        .required(true)
                        .help("Username of the author"),
                )
                .arg(
                    Arg::with_name("title")
                        .short("t")
                        .long("title")
                        .takes_value(true)
                        .help("The title of the post"),
                )
                .arg(
                    Arg::with_name("content")
                        .short("c")
                        .long("content")
                        .takes_value(true)
                        .help("The markdown source of the post"),
                )
                .arg(
                    Arg::with_name("type")
                        .long("type")
                        .takes_value(true)
                        .possible_values(&["post", "note", "link", "single_photo", "multi_photo"])
                        .default_value("post")
                        .help("How the post is displayed"),
                )
                .arg(
                    Arg::with_name("link")
                        .long("link")
                        .takes_value(true)
                        .help("The URL a link post points to"),
                )
                .arg(
                    Arg::with_name("tags")
                        .long("tags")
                        .takes_value(true)
                        .help("Comma separated list of tags"),
                )
                .arg(
                    Arg::with_name("draft")
                        .long("draft")
                        .help("Don't publish the post yet"),
                )
                .about("Write a new post"),
        )
        .subcommand(
            SubCommand::with_name("image")
                .arg(
                    Arg::with_name("post")
                        .short("i")
                        .long("post")
                        .takes_value(true)
                        .required(true)
                        .help("The id of the post"),
                )
                .arg(
                    Arg::with_name("url")
                        .short("u")
                        .long("url")
                        .takes_value(true)
                        .required(true)
                        .help("Where the image is served from"),
                )
                .arg(
                    Arg::with_name("alt")
                        .long("alt")
                        .takes_value(true)
                        .help("Description of the image"),
                )
                .about("Attach an image to a multi-photo post"),
        )
}

pub fn run<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    match args.subcommand() {
        ("new", Some(x)) => new(x, conn),
        ("image", Some(x)) => image(x, conn),
        ("", None) => command().print_help().unwrap(),
        _ => println!("Unknown subcommand"),
    }
}

fn new<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let author = args.value_of("author").unwrap();
    let author = User::find_by_name(conn, author)
        .unwrap_or_else(|_| panic!("Couldn't find the user {}", author));
    let title = args
        .value_of("title")
        .map(String::from)
        .unwrap_or_else(|| super::ask_for("Title"));
    let source = args.value_of("content").unwrap_or_default();
    let display_type = args
        .value_of("type")
        .unwrap_or_default()
        .parse::<PostDisplayType>()
        .expect("Invalid post type");

    let (mut post, hashtags) = NewPost::from_markdown(&author, &title, source, display_type);
    post.post_link = args.value_of("link").map(String::from);
    post.published = !args.is_present("draft");
    let post = Post::insert(conn, post).expect("Couldn't save the post");

    let mut tags = args
        .value_of("tags")
        .map(|tags| tags.split(',').map(String::from).collect::<Vec<_>>())
        .unwrap_or_default();
    tags.extend(hashtags);
    let tags = post.set_tags(conn, &tags).expect("Couldn't save the tags");

    println!(
        "Created post {} ({}) with {} tag(s)",
        post.id,
        post.slug,
        tags.len()
    );
}

fn image<'a>(args: &ArgMatches<'a>, conn: &Connection) {
    let post_id = args
        .value_of("post")
        .unwrap()
        .parse::<i32>()
        .expect("The post id should be a number");
    let post = Post::get(conn, post_id).expect("Couldn't find the post");
    if post.display_type() != PostDisplayType::MultiPhoto {
        eprintln!("Warning: post {} is not a multi-photo post, its images won't be shown", post.id);
    }
    let image = PostImage::insert(
        conn,
        NewPostImage {
            post_id: post.id,
            url: args.value_of("url").unwrap().to_owned(),
            alt_text: args.value_of("alt").unwrap_or_default().to_owned(),
        },
    )
    .expect("Couldn't save the image");
    println!("Added image {} to post {}", image.id, post.id);
}
