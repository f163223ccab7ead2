mod app_helper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

mod cli_manager;

mod command;

pub(crate) mod common;

mod consistency_check_command;
pub(crate) use consistency_check_command::ConsistencyCheckCommand;

mod graph_repair_command;
pub(crate) use graph_repair_command::GraphRepairCommand;

mod report;

mod writable_string;
