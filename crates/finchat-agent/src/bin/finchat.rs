//! Finchat CLI
//!
//! An interactive command-line interface for the financial-analysis
//! agents.
//!
//! # Usage
//!
//! ```bash
//! # Select a model provider and set its credential
//! export MODEL_PROVIDER=deepseek
//! export DEEPSEEK_API_KEY=sk-...
//!
//! # Service keys
//! export TUSHARE_MCP_KEY=...
//! export TAVILY_API_KEY=tvly-...
//!
//! cargo run --bin finchat -p finchat-agent -- --mode team
//! ```

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use finchat_agent::{
    ChatConfig, FinanceToolsets, Language, PromptRefinerAgent, create_analysis_team,
    create_finance_agent, create_full_review, create_research_pipeline, prompts,
};
use finchat_core::{Agent, Context};
use finchat_llm::ModelHandle;
use finchat_prompt::PromptRegistry;
use finchat_runtime::Runtime;
use finchat_tools::{Tool, WebSearchTool};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Single finance analyst with all tools
    Chat,
    /// Specialist team with intent routing
    Team,
    /// Parallel full review by all specialists
    Review,
    /// Sequential market research pipeline
    Pipeline,
    /// Multi-turn prompt refinement
    Refine,
}

#[derive(Parser, Debug)]
#[command(name = "finchat")]
#[command(about = "Financial analysis chatbot", long_about = None)]
struct Args {
    /// Agent mode to run
    #[arg(short, long, value_enum, default_value = "chat")]
    mode: Mode,

    /// Answer language (zh or en)
    #[arg(short, long, default_value = "zh")]
    language: String,

    /// Max tokens per completion
    #[arg(long)]
    max_tokens: Option<usize>,
}

fn print_banner(mode: Mode) {
    println!(
        r"
╔══════════════════════════════════════════════════════════╗
║                    finchat 金融分析助手                   ║
║                                                          ║
║  模式 (mode): {mode:?}
║                                                          ║
║  Commands:                                               ║
║    /help   - 显示帮助 (Help)                             ║
║    /exit   - 退出 (Exit)                                 ║
║                                                          ║
║  Or ask in natural language:                             ║
║    '贵州茅台最近表现怎么样?'                             ║
║    'How risky is my tech-heavy portfolio?'               ║
╚══════════════════════════════════════════════════════════╝
"
    );
}

fn print_help() {
    println!("/help - show this help");
    println!("/exit - quit");
    println!("Anything else is sent to the agent.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,finchat_agent=info".to_string()),
        )
        .init();

    let args = Args::parse();
    print_banner(args.mode);

    // Application configuration: service keys and endpoints
    let mut config = ChatConfig::from_env();
    config.language = Language::from_code(&args.language);
    if let Some(max_tokens) = args.max_tokens {
        config.max_tokens = max_tokens;
    }
    config
        .validate()
        .context("Deployment misconfiguration (service keys)")?;

    // Model provider resolution; fails loudly on unknown provider or
    // missing credential
    let handle = ModelHandle::from_env().context("Model provider resolution failed")?;
    println!("Configuration:");
    println!("  Provider: {}", handle.provider());
    println!("  Model:    {}", handle.model());
    println!("  Endpoint: {}", handle.api_base());
    println!();

    let runtime = Arc::new(
        Runtime::from_handle(&handle, config.runtime_config())
            .context("LLM runtime construction failed")?,
    );

    // Prompts
    let registry = PromptRegistry::with_language(config.language.clone());
    prompts::register_prompts(&registry).context("Prompt registration failed")?;

    // Tools: web search plus the finance MCP toolsets
    let search: Arc<dyn Tool> = Arc::new(
        WebSearchTool::new(config.search_api_key.clone().unwrap_or_default())
            .context("Web search tool construction failed")?,
    );

    println!("Connecting to finance data services...");
    let toolsets = FinanceToolsets::connect(&config).await?;
    println!("  {} of 3 services available\n", toolsets.connected_count());

    // Build the agent for the selected mode
    let agent: Arc<dyn Agent> = match args.mode {
        Mode::Chat => Arc::new(create_finance_agent(
            &runtime, &registry, &toolsets, search,
        )?),
        Mode::Team => Arc::new(create_analysis_team(
            &runtime, &registry, &toolsets, search,
        )?),
        Mode::Review => Arc::new(create_full_review(&runtime, &registry, &toolsets, search)?),
        Mode::Pipeline => Arc::new(create_research_pipeline(
            &runtime, &registry, &toolsets, search,
        )?),
        Mode::Refine => Arc::new(PromptRefinerAgent::new(&runtime, &registry)?),
    };

    println!("Ready! ({})\n", agent.name());

    // REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut context = Context::new()
        .with_language(config.language.code())
        .with_user_id("cli_user");

    loop {
        print!("finchat> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\n再见! Goodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/exit" | "/quit" => {
                println!("再见! Goodbye!");
                break;
            }
            "/help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        match agent.process(input.to_string(), &mut context).await {
            Ok(response) => println!("\n{response}\n"),
            Err(e) => eprintln!("\nError: {e}\n"),
        }
    }

    Ok(())
}
