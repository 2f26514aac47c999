pub mod fake;
pub mod http;
pub mod storage;

pub use fake::{FakeTransport, MemorySessionStorage};
pub use http::ReqwestTransport;
pub use storage::FileSessionStorage;
