use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registry::RegistryError;

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        let status = match e {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_timetables_map_to_404() {
        let e: ApiError = RegistryError::NotFound("x".into()).into();
        assert_eq!(e.0, StatusCode::NOT_FOUND);
        assert_eq!(e.1, "timetable x not found");

        let e: ApiError = RegistryError::UnknownEntity { kind: "room", id: "r9".into() }.into();
        assert_eq!(e.0, StatusCode::BAD_REQUEST);
    }
}
