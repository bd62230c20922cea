//! Welcome banner printed when the chat loop starts.

use console::style;
use parley_types::snapshot::ChatSnapshot;

use super::renderer::model_label;

pub fn print_welcome_banner(snapshot: &ChatSnapshot, dispatcher: &str) {
    let session = snapshot
        .current_session()
        .map(|s| s.title.as_str())
        .unwrap_or_default();

    println!();
    println!("  {}", style("Parley").cyan().bold());
    println!("  {}", style("Chat with several models across sessions").dim());
    println!();
    println!(
        "  {}    {}",
        style("Model:").bold(),
        model_label(Some(&snapshot.selected_model_id), snapshot)
    );
    println!("  {}  {}", style("Session:").bold(), style(session).dim());
    println!("  {}  {}", style("Backend:").bold(), style(dispatcher).dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
