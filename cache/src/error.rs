use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache: kv error: {0}")]
    KV(#[from] tracekv_kv::KVError),

    #[error("cache: stored value is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("cache: stored value is not an integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("cache: decode error: {0}")]
    Decode(String),
}
