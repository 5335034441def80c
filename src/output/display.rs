//! Terminal output for the interactive session

use crossterm::style::{Color, Stylize};

use super::columns::Columns;
use super::session::Session;
use crate::research::{Perspective, ResultGrid};

const QUESTION_COLOR: Color = Color::Yellow;

fn centered(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}

pub fn print_banner(width: usize) {
    let rule = "=".repeat(width);
    println!("{}", rule.as_str().yellow());
    println!(
        "{}",
        centered("MULTI-PERSPECTIVE RESEARCH ASSISTANT", width)
            .yellow()
            .bold()
    );
    println!(
        "{}",
        centered("Each topic becomes 3 questions x 3 perspectives", width).yellow()
    );
    println!(
        "{}",
        centered("Type 'exit' to quit the application", width).yellow()
    );
    println!("{}", rule.yellow());
}

pub fn print_questions(questions: &[String; 3], width: usize) {
    let rule = "=".repeat(width);
    println!("\n{}", rule);
    println!(
        "{}",
        centered("GENERATED RESEARCH QUESTIONS", width)
            .with(QUESTION_COLOR)
            .bold()
    );
    println!("{}", rule);
    for (idx, question) in questions.iter().enumerate() {
        println!(
            "{}",
            format!("QUESTION {}: {}", idx + 1, question).with(QUESTION_COLOR)
        );
    }
    println!("{}\n", rule);
}

/// Static overview printed right before the fan-out; nothing is redrawn while tasks run
pub fn print_dashboard(questions: &[String; 3], width: usize) {
    let rule = "─".repeat(width);
    println!("{}", "\nLAUNCHING ALL RESEARCH TASKS IN PARALLEL...".yellow().bold());
    println!("{}", rule);
    for (idx, question) in questions.iter().enumerate() {
        println!(
            "{} {}",
            format!("Q{}:", idx + 1).bold(),
            crate::research::preview(question)
        );
        for (n, perspective) in Perspective::ALL.into_iter().enumerate() {
            let branch = if n + 1 == Perspective::ALL.len() {
                "└─"
            } else {
                "├─"
            };
            let name = capitalize(perspective.id());
            println!(
                "  {} {}: {}",
                branch,
                name.as_str().with(perspective.color()),
                "in progress".with(perspective.color())
            );
        }
    }
    println!("{}", rule);
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn print_grid(grid: &ResultGrid, width: usize) {
    println!("{}", "\nALL RESEARCH COMPLETE! DISPLAYING RESULTS:".green().bold());
    for row in grid.rows() {
        let texts = Perspective::ALL.map(|p| row.get(p).text());
        print_question_block(
            row.question_index + 1,
            &row.question,
            [&*texts[0], &*texts[1], &*texts[2]],
            width,
        );
    }
}

/// Render a saved session the same way a live one is shown
pub fn print_session(session: &Session, width: usize) {
    println!("{}", format!("Session {}", session.session_id).yellow().bold());
    println!("Topic: {}", session.topic);
    println!("Recorded: {}", session.timestamp.to_rfc3339());

    if session.research_results.is_empty() {
        println!("\n{}", session.questions_generation.response.as_str().red());
        return;
    }

    for record in &session.research_results {
        let blocks = Perspective::ALL.map(|p| record.get(p).response.as_str());
        print_question_block(record.question_number, &record.question, blocks, width);
    }
}

fn print_question_block(number: usize, question: &str, blocks: [&str; 3], width: usize) {
    println!(
        "{}",
        format!("\nRESULTS FOR QUESTION {}:", number)
            .with(QUESTION_COLOR)
            .bold()
    );
    println!("{}", question.with(QUESTION_COLOR));
    println!("{}", "─".repeat(width).with(QUESTION_COLOR));

    let columns = Columns::new(Perspective::ALL.map(Perspective::label), blocks, width);
    print_columns(&columns);
}

fn print_columns(columns: &Columns) {
    let colors = Perspective::ALL.map(Perspective::color);
    println!();
    for line in columns.render_with(|col, cell| cell.with(colors[col]).to_string()) {
        println!("{}", line);
    }
    println!();
}
