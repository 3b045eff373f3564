pub mod storage;

pub use storage::{AwsS3Client, InMemoryObjectStore, ObjectStoreClient};
