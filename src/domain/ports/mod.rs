mod routines_port;
mod session_port;
mod session_storage_port;

pub use routines_port::RoutinesPort;
pub use session_port::SessionPort;
pub use session_storage_port::SessionStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::routines_port::MockRoutinesPort;
    pub use super::session_port::mock::MockSessionPort;
    pub use super::session_storage_port::mock::MockSessionStorage;
}
