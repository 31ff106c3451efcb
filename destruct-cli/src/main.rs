//! destruct CLI - evaluate destructuring patterns from JSON documents.
//! destruct CLI - 从 JSON 文档求值解构模式。

mod commands;
mod output;

use clap::{Parser, Subcommand};
use destruct_eval::{BindingForm, DEFAULT_REST_LIMIT, EvalOptions};

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "destruct")]
#[command(author, version, about = "destruct - evaluate destructuring patterns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output; only the exit status reports the result. / 抑制所有输出，仅以退出码报告结果。
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Destructure a value with a pattern. / 用模式解构一个值。
    Eval {
        /// Pattern document (file path or inline JSON). / 模式文档（文件路径或内联 JSON）。
        pattern: String,

        /// Source value document (file path or inline JSON). / 源值文档（文件路径或内联 JSON）。
        value: String,

        /// Outer scope document: a JSON object of names. / 外部作用域文档：名称组成的 JSON 对象。
        #[arg(long)]
        outer: Option<String>,

        #[command(flatten)]
        options: EvalArgs,
    },

    /// Statically validate a pattern. / 静态校验模式。
    Check {
        /// Pattern document (file path or inline JSON). / 模式文档（文件路径或内联 JSON）。
        pattern: String,

        /// Check as an assignment instead of a declaration. / 按赋值而非声明检查。
        #[arg(long)]
        assign: bool,
    },

    /// Describe what a pattern binds and pulls. / 描述模式绑定和拉取的内容。
    Explain {
        /// Pattern document (file path or inline JSON). / 模式文档（文件路径或内联 JSON）。
        pattern: String,
    },
}

/// Evaluator flags. / 求值器选项。
#[derive(clap::Args)]
struct EvalArgs {
    /// Assignment form: overwrite names, allow member targets. / 赋值形式：覆盖名称，允许成员目标。
    #[arg(long)]
    assign: bool,

    /// Make an empty array pattern require an iterable source. / 空数组模式也要求可迭代的源。
    #[arg(long)]
    strict_empty: bool,

    /// Maximum elements a rest element may collect. / 剩余元素最多收集的元素数。
    #[arg(long, default_value_t = DEFAULT_REST_LIMIT, conflicts_with = "no_rest_limit")]
    rest_limit: usize,

    /// Let rest elements collect without bound. / 剩余元素不设上限。
    #[arg(long)]
    no_rest_limit: bool,
}

impl EvalArgs {
    fn to_options(&self) -> EvalOptions {
        let form = if self.assign {
            BindingForm::Assignment
        } else {
            BindingForm::Declaration
        };
        EvalOptions::new()
            .form(form)
            .vacuous_empty_positional(!self.strict_empty)
            .rest_limit((!self.no_rest_limit).then_some(self.rest_limit))
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `--verbose`.
/// 安装日志订阅者。`RUST_LOG` 优先于 `--verbose`。
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new("destruct_eval=trace,destruct_cli=debug"),
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Eval {
            pattern,
            value,
            outer,
            options,
        } => commands::eval::run(
            &pattern,
            &value,
            outer.as_deref(),
            options.to_options(),
            cli.verbose,
            cli.quiet,
        ),
        Commands::Check { pattern, assign } => {
            commands::check::run(&pattern, assign, cli.verbose, cli.quiet)
        }
        Commands::Explain { pattern } => commands::explain::run(&pattern, cli.quiet),
    };

    if let Err(e) = result {
        if !cli.quiet {
            output::error(&e);
        }
        std::process::exit(1);
    }
}
