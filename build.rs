const COMMANDS: &[&str] = &["start_update"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
