pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("password length {length} is too short (minimum is {minimum})")]
    LengthTooShort { length: usize, minimum: usize },
    #[error("password length {length} is too long (maximum is {maximum})")]
    LengthTooLong { length: usize, maximum: usize },
    #[error("secure random source unavailable: {0}")]
    Entropy(
        #[from]
        #[source]
        getrandom::Error,
    ),
}
