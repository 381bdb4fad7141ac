//! Command implementations for notesctl CLI

pub mod init_db;
pub mod notes;

pub use init_db::run_init_db;
pub use notes::{
    run_add, run_edit, run_list, run_rm, run_show, AddArgs, EditArgs, IdArgs, ListArgs, ShowArgs,
};
