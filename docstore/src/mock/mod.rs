pub mod mock_store;
pub mod value;
