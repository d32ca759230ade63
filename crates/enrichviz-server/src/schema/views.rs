//! Render view types.

use serde::Serialize;

use crate::views::RenderView;

#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub view: RenderView,
}
