use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Asha Rao")]
    pub full_name: String,

    /// Natural key, matched case-insensitively
    #[schema(example = "E1")]
    pub enrollment: String,

    #[schema(example = "MSc CS")]
    pub program: String,

    #[schema(example = "Sem 1")]
    pub semester: String,
}
