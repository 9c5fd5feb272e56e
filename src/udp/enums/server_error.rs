use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("internal server error")]
    InternalServerError,

    // exact spelling matters: clients match on this string
    #[error("Invalid ConnectionID")]
    InvalidConnectionId,

    #[error("bad request")]
    BadRequest,
}
