mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;


use std::io::{self, IsTerminal, Write};
use std::process;

use cli::{
    config_to_command, fill_prompt_from_input, parse_args, print_completion, Config, ParseOutcome,
};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::OneshotCommand;
use ports::inbound::UseCaseRunner;
use usecase::CompleteInput;
use wiring::{wire_oneshot, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner<W: Write> {
    app: App,
    out: std::cell::RefCell<W>,
}

impl<W: Write> Runner<W> {
    fn new(app: App, out: W) -> Self {
        Self {
            app,
            out: std::cell::RefCell::new(out),
        }
    }

    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli"));
    }
}

impl<W: Write> UseCaseRunner for Runner<W> {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd.name();
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match cmd {
            OneshotCommand::Help => {
                print_help(&mut *self.out.borrow_mut());
                Ok(0)
            }
            OneshotCommand::Complete {
                prompt,
                model,
                system,
                temperature,
                max_tokens,
                timeout,
                format,
            } => {
                if prompt.trim().is_empty() {
                    Err(Error::invalid_argument(
                        "No prompt provided. Pass it as arguments or on stdin.",
                    ))
                } else {
                    let input = CompleteInput {
                        prompt,
                        model,
                        system,
                        temperature,
                        max_tokens,
                        timeout,
                        format,
                    };
                    self.app
                        .complete_use_case
                        .run(input, &mut *self.out.borrow_mut())
                }
            }
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            self.log(
                LogRecord::new(LogLevel::Error, e.to_string())
                    .kind("error")
                    .field("error_kind", e.kind().as_str()),
            );
        }
        result
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("oneshot: {}: {}", e.kind(), e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let mut config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell, &mut io::stdout());
            return Ok(0);
        }
    };
    let stdin = io::stdin();
    let is_terminal = stdin.is_terminal();
    fill_prompt_from_input(&mut config, stdin.lock(), is_terminal)?;
    let app = wire_oneshot(config.verbose)?;
    let runner = Runner::new(app, io::stdout().lock());
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: oneshot [options] [prompt...]");
}

fn print_help(out: &mut dyn Write) {
    let _ = writeln!(
        out,
        "\
Usage: oneshot [options] [prompt...]
Options:
  -h, --help                    Show this help message
  -m, --model <model>           Model name (default: $ONESHOT_MODEL or gpt-4o)
  -S, --system <instruction>    Prepend a system instruction
  -T, --temperature <t>         Sampling temperature (0.0 - 2.0)
      --max-tokens <n>          Upper bound on generated tokens
  -t, --timeout <secs>          Request timeout in seconds, 1 - 86400 (default: $ONESHOT_TIMEOUT_SECS or 30)
      --text                    Print only the generated text instead of the raw response
  -v, --verbose                 Emit request logs to stderr
      --generate <shell>        Generate shell completion script (bash, zsh, fish, ...)

Environment (a .env file in the current directory or its parents is also read):
  OPENAI_API_KEY        API key (required)
  OPENAI_BASE_URL       Endpoint base URL (default: https://api.openai.com/v1)
  ONESHOT_MODEL         Default model
  ONESHOT_TIMEOUT_SECS  Default timeout in seconds
  ONESHOT_LOG_FILE      Append JSONL logs to this file

Exit status:
  0 success, 64 usage/configuration, 69 service error, 70 internal error,
  74 network error, 77 authentication error

Examples:
  oneshot Say hello.
  oneshot -m gpt-4o-mini --text Summarize Rust ownership in one sentence
  cat notes.txt | oneshot -S \"Summarize the input\" --text"
    );
}
