mod account;
mod view;

pub use account::{AccountRecordMapper, AccountSnapshotMapper};
pub use view::AccountViewMapper;
