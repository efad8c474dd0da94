mod args;

pub use args::{AccountCommand, ApiArgs, Cli, CreateArgs, DeleteArgs, ImportArgs, ReadArgs, UpdateArgs};
