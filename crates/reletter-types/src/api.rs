use serde::{Deserialize, Serialize};

// -- Token Claims --

/// Claims carried in the access token's payload segment. The client only
/// needs `email`; everything else the server puts there is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

// -- Diaries --

/// Query string for `GET /diaries/group/{group_id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupDiaryQuery {
    pub date: String,
}
