use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{EnvironmentError, ResearchError};
use crate::output::display::{print_banner, print_dashboard, print_grid, print_questions};
use crate::output::{new_session_id, resolve_width, Session, SessionRecorder};
use crate::provider::{OpenRouterClient, TextGenerationService};
use crate::research::{PromptSet, ResearchOrchestrator};
use crossterm::style::Stylize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const EXIT_TOKEN: &str = "exit";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Exit,
    Empty,
    Topic(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(EXIT_TOKEN) {
        Input::Exit
    } else if trimmed.is_empty() {
        Input::Empty
    } else {
        Input::Topic(trimmed)
    }
}

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if args.language.is_some() {
        config.language = args.language;
    }

    config.validate()?;

    // Environment problems stop the process before any topic is accepted
    let api_key = std::env::var(&config.provider.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| EnvironmentError::MissingCredential(config.provider.api_key_env.clone()))?;

    std::fs::create_dir_all(&config.output_dir).map_err(|source| EnvironmentError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;
    let recorder = SessionRecorder::new(&config.output_dir);

    let client = OpenRouterClient::new(&config.provider, api_key)?;
    let service: Arc<dyn TextGenerationService> = Arc::new(client);
    info!(
        "Using {} model {} via {}",
        service.name(),
        config.provider.model,
        config.provider.base_url
    );

    let orchestrator =
        ResearchOrchestrator::new(service, PromptSet::new(config.language.as_deref()));

    if let Some(topic) = args.topic {
        return match parse_input(&topic) {
            Input::Topic(topic) => {
                research_topic(&orchestrator, &recorder, topic, config.default_width).await?;
                Ok(())
            }
            _ => anyhow::bail!("--topic must be a non-empty research topic"),
        };
    }

    print_banner(resolve_width(config.default_width));

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        print!(
            "{}",
            "\nEnter a research topic (or 'exit' to quit): ".yellow()
        );
        std::io::stdout().flush()?;

        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            println!();
            break;
        }

        // Undecodable input is rejected for this round only
        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!("Ignoring input line that is not valid UTF-8");
            println!("{}", "Input was not valid UTF-8, please try again".yellow());
            continue;
        };

        match parse_input(line) {
            Input::Exit => {
                println!("{}", "Exiting application...".yellow());
                break;
            }
            Input::Empty => {
                println!("{}", "Please enter a valid topic".yellow());
            }
            Input::Topic(topic) => {
                if let Err(e) =
                    research_topic(&orchestrator, &recorder, topic, config.default_width).await
                {
                    warn!("Topic '{}' abandoned: {}", topic, e);
                    continue;
                }
                println!(
                    "{}",
                    "\nResearch complete! You can enter another topic or type 'exit' to quit."
                        .yellow()
                );
            }
        }
    }

    Ok(())
}

/// One topic submission: questions, fan-out, display, then a single session write.
/// A save failure is reported and swallowed; a question generation failure is
/// returned after the transcript has been recorded.
async fn research_topic(
    orchestrator: &ResearchOrchestrator,
    recorder: &SessionRecorder,
    topic: &str,
    default_width: usize,
) -> Result<(), ResearchError> {
    let session_id = new_session_id();
    let width = resolve_width(default_width);

    println!("{}", "\nGenerating research questions...".yellow());
    let (session, outcome) = match orchestrator.generate_questions(topic).await {
        Ok(question_set) => {
            print_questions(&question_set.questions, width);
            print_dashboard(&question_set.questions, width);

            let grid = orchestrator.research(&question_set.questions).await;
            print_grid(&grid, width);

            (
                Session::completed(session_id, topic, &question_set, &grid),
                Ok(()),
            )
        }
        Err(e) => {
            println!(
                "{}",
                format!("Error generating research questions: {}", e).red()
            );
            (Session::failed(session_id, topic, &e.to_string()), Err(e))
        }
    };

    match recorder.record(&session) {
        Ok(path) => println!(
            "{}",
            format!("Saved research to {}", path.display()).green()
        ),
        Err(e) => {
            warn!("Failed to save session {}: {}", session.session_id, e);
            println!("{}", format!("Error saving research: {}", e).red());
        }
    }

    outcome
}
