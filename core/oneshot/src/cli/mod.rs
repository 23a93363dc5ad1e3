//! CLI（引数解析・補完スクリプト生成）

mod args;

pub use args::{
    config_to_command, fill_prompt_from_input, parse_args, print_completion, Config, ParseOutcome,
};
