use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LocalFileQuery {
    /// File name of the image, as encoded in a task's image path.
    pub d: String,
}
