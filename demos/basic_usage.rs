// Basic usage example for user-settings
//
// Run with: cargo run --example basic_usage

use serde_json::json;
use user_settings::Preferences;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let prefs = Preferences::builder()
        .preference_file_dir("./example_config")
        .file_name("Settings")
        .pretty_json()
        .build();

    println!("📁 Preference file: {}\n", prefs.default_preference_file_path()?.display());

    // Single values
    prefs.set_state("app.name", "My App", None)?;
    prefs.set_state("app.theme", "dark", None)?;
    prefs.set_state("ui.font_size", 14, None)?;

    println!("🎨 Theme: {}", prefs.get_state("app.theme", "light", None)?);
    println!("🔤 Font size: {}", prefs.get_state("ui.font_size", 12, None)?);
    println!("❓ Language: {}", prefs.get_state("ui.language", "en", None)?);

    // Several values at once
    let written = prefs.set_states([("window.width", 1280), ("window.height", 720)], None)?;
    println!("\n🪟 Wrote window size: {written:?}");
    println!(
        "   Read back: {:?}",
        prefs.get_states(&["window.width", "window.height", "window.x"], None)?
    );

    // A second file next to the default one
    prefs.set_state("last_project", "/home/user/project", Some("Recent.json"))?;
    if let Some(path) = prefs.last_optional_file_path() {
        println!("\n📄 Recent projects live in {}", path.display());
    }

    // Whole documents
    println!("\n📦 Current document: {}", prefs.deserialize(None)?);
    prefs.delete_key("ui.font_size", None)?;
    println!("🗑️  After deleting ui.font_size: {}", prefs.deserialize(None)?);

    prefs.serialize(&json!({"app.theme": "light"}), Some("Reset.json"))?;
    println!("♻️  Reset.json: {}", prefs.deserialize(Some("Reset.json"))?);

    // Clean up
    prefs.delete_file(Some("Recent.json"))?;
    prefs.delete_file(Some("Reset.json"))?;
    prefs.delete_file(None)?;
    println!("\n✅ Done");

    Ok(())
}
