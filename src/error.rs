use thiserror::Error;

use crate::network::ApiError;

/// Domain-level failure handed to use cases and presenters.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("resource not found")]
    NotFound,

    #[error(transparent)]
    Api(ApiError),
}

impl AppError {
    /// The only conversion from [`ApiError`]. HTTP 404 becomes
    /// [`AppError::NotFound`], everything else is kept as is.
    pub fn from_api(error: ApiError) -> Self {
        match error {
            ApiError::Http { code: 404, .. } => AppError::NotFound,
            other => AppError::Api(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrows_404_only() {
        let not_found = ApiError::Http {
            code: 404,
            body: String::new(),
        };
        let server = ApiError::Http {
            code: 500,
            body: "boom".to_string(),
        };

        assert!(matches!(AppError::from_api(not_found), AppError::NotFound));
        assert!(matches!(
            AppError::from_api(server),
            AppError::Api(ApiError::Http { code: 500, .. })
        ));
        assert!(matches!(
            AppError::from_api(ApiError::unknown("x")),
            AppError::Api(ApiError::Unknown(_))
        ));
    }
}
