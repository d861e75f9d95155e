use anyhow::Result;
use std::process::Command;
use which::which;

/// External tools tunefetch shells out to, with the flag that prints a version
const TOOLS: &[(&str, &str, &str)] = &[
    ("yt-dlp", "--version", "brew install yt-dlp"),
    ("ffmpeg", "-version", "brew install ffmpeg"),
    ("ffprobe", "-version", "brew install ffmpeg"),
];

pub async fn run() -> Result<()> {
    println!("tunefetch dependency check\n");

    let mut all_ok = true;

    for (name, version_flag, install_hint) in TOOLS {
        print!("{:<9} ", format!("{}:", name));
        match which(name) {
            Ok(path) => match Command::new(&path).arg(version_flag).output() {
                Ok(out) => {
                    let stdout = String::from_utf8_lossy(&out.stdout);
                    println!("OK ({})", version_of(name, &stdout));
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    all_ok = false;
                }
            },
            Err(_) => {
                println!("NOT FOUND");
                println!("          Install with: {}", install_hint);
                all_ok = false;
            }
        }
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for installation instructions.");
    }

    Ok(())
}

/// yt-dlp prints a bare version; FFmpeg tools print "<name> version <v> ..."
fn version_of(tool: &str, stdout: &str) -> String {
    let first_line = stdout.lines().next().unwrap_or("").trim();
    if tool == "yt-dlp" {
        return first_line.to_string();
    }
    first_line
        .split_whitespace()
        .nth(2)
        .unwrap_or("unknown")
        .to_string()
}
