//! Model listing command implementation.

use augur_models::available_models;

/// List the model lookup table.
pub(crate) fn list_models() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Available Models                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for info in available_models() {
        println!("  {:15} - {}", info.name, info.display_name);
        println!("  {:15}   {}", "", info.description);
        if !info.aliases.is_empty() {
            println!("  {:15}   aliases: {}", "", info.aliases.join(", "));
        }
        println!();
    }
}
