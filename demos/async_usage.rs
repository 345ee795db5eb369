// Async and callback usage example for user-settings
//
// Run with: cargo run --example async_usage

use std::sync::mpsc;
use user_settings::Preferences;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let prefs = Preferences::builder()
        .preference_file_dir("./example_config")
        .file_name("AsyncSettings")
        .build();

    // Argument and path errors come back from the call; the future only does I/O
    let saved = prefs.set_state_async("session.user", "alice", None)?.await;
    println!("💾 Saved: {saved}");

    let user = prefs.get_state_async("session.user", "guest", None)?.await;
    println!("👤 User: {user}");

    let values = prefs
        .get_states_async(&["session.user", "session.token"], None)?
        .await;
    println!("🔑 Session: {values:?}");

    if let Err(e) = prefs.set_state_async("", "oops", None) {
        println!("⚠️  Rejected before any I/O: {e}");
    }

    // Callback style, delivered on a worker thread
    let (tx, rx) = mpsc::channel();
    prefs.has_key_with("session.user", None, move |result| {
        let _ = tx.send(result);
    })?;
    println!("📬 Callback says key exists: {}", rx.recv()??);

    let removed = prefs.delete_file_async(None)?.await;
    println!("\n🗑️  Removed file: {removed}");

    Ok(())
}
