use serde::{Deserialize, Serialize};

/// Query string of both search routes: `?keyword=<term>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}
