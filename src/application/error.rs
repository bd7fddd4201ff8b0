#[derive(Debug)]
pub enum ApplicationError {
    NotFound(String),
    BadRequest(String),
    PayloadTooLarge,
    InternalError(String),
}
