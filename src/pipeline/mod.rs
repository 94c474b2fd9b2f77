pub mod compress;
pub mod crypto;

pub use compress::{compress, decompress, digest};
pub use crypto::{decrypt, derive_key, encrypt, generate_iv, IV_LEN, KEY_LEN};
