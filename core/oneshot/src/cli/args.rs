use crate::domain::command::OutputFormat;
use crate::domain::OneshotCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::ModelName;
use common::error::Error;
use common::llm::config::MAX_TIMEOUT_SECS;
use std::io::Read;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 要点のログを stderr に出力する
    pub verbose: bool,
    /// --text: レスポンス JSON ではなく生成テキストのみを出力する
    pub text: bool,
    pub model: Option<ModelName>,
    pub system: Option<String>,
    pub temperature: Option<f64>,
    /// --max-tokens: 生成トークン数の上限
    pub max_tokens: Option<u32>,
    /// -t / --timeout（秒）。未指定なら ONESHOT_TIMEOUT_SECS か既定の 30 秒
    pub timeout: Option<Duration>,
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("oneshot")
        .about("Send one prompt to a chat completion endpoint and print the response")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit request logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("text")
                .long("text")
                .help("Print only the generated text instead of the raw response")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gpt-4o, gpt-4o-mini)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("system")
                .short('S')
                .long("system")
                .value_name("instruction")
                .help("Set system instruction for this prompt")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("temperature")
                .short('T')
                .long("temperature")
                .value_name("temperature")
                .help("Sampling temperature (0.0 - 2.0)")
                .value_parser(value_parser!(f64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("n")
                .help("Upper bound on generated tokens")
                .value_parser(value_parser!(u32).range(1..))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("secs")
                .help("Request timeout in seconds (default: 30, max: 86400)")
                .value_parser(value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Prompt words (read from stdin when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let message_args: Vec<String> = matches
        .get_many::<String>("positional")
        .map(|i| i.cloned().collect())
        .unwrap_or_default();

    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        text: matches.get_flag("text"),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        system: matches.get_one::<String>("system").cloned(),
        temperature: matches.get_one::<f64>("temperature").copied(),
        max_tokens: matches.get_one::<u32>("max-tokens").copied(),
        timeout: matches
            .get_one::<u64>("timeout")
            .map(|&secs| Duration::from_secs(secs)),
        message_args,
    }
}

fn matches_to_outcome(matches: clap::ArgMatches) -> ParseOutcome {
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return ParseOutcome::GenerateCompletion(shell);
    }
    ParseOutcome::Config(matches_to_config(&matches))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_outcome(matches))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_outcome(matches))
}

/// プロンプト語が無く、入力が端末でなければ入力全文（末尾の空白を除く）をプロンプトにする
pub fn fill_prompt_from_input(
    config: &mut Config,
    mut input: impl Read,
    is_terminal: bool,
) -> Result<(), Error> {
    if config.help || !config.message_args.is_empty() || is_terminal {
        return Ok(());
    }
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .map_err(|e| Error::io_msg(format!("Failed to read stdin: {}", e)))?;
    config.message_args.push(buf.trim_end().to_string());
    Ok(())
}

/// 補完スクリプトを書き出す
pub fn print_completion(shell: Shell, out: &mut dyn std::io::Write) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "oneshot", out);
}

/// Config を OneshotCommand に変換する
pub fn config_to_command(config: Config) -> OneshotCommand {
    if config.help {
        return OneshotCommand::Help;
    }

    OneshotCommand::Complete {
        prompt: config.message_args.join(" "),
        model: config.model,
        system: config.system,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        timeout: config.timeout,
        format: if config.text {
            OutputFormat::Text
        } else {
            OutputFormat::Raw
        },
    }
}
