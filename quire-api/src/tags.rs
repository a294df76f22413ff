/// A tag together with the number of published posts carrying it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub tag_id: i32,
    pub tag_value: String,
    pub tag_count: i64,
}
