pub mod files;
pub mod store;

pub use files::{data_file, ensure_data_dir, get_data_dir, init_local_data_dir, LOG_FILE_NAME};
pub use store::{load_or_default, JsonFileStorage, PersistedState, Storage, StorageError};

#[cfg(test)]
pub use store::testing::MemoryStorage;
