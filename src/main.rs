// src/main.rs

use anyhow::Result;

fn main() -> Result<()> {
    wavetap::ui::run()
}
