//! Page-level operations.
//!
//! Each module owns the data flow of one screen: it talks to the backend
//! provider or the application API and hands typed values back to the
//! command that renders them.

use thiserror::Error;
use uuid::Uuid;

use crate::api::ApiError;
use crate::backend::BackendError;
use crate::context::AppContext;
use crate::session::SessionError;

pub mod analysis;
pub mod coach;
pub mod exercises;
pub mod history;
pub mod photos;
pub mod profiles;
pub mod routines;
pub mod stats;
pub mod videos;
pub mod workout;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Form input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Imagen no válida: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Access token and user id of the signed-in user
pub(crate) async fn credentials(ctx: &AppContext) -> Result<(String, Uuid)> {
    let session = ctx.session.session().await?;
    Ok((session.access_token, session.user.id))
}
