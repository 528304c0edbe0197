use anyhow::{Context, Result as AResult};
use std::process::exit;

use anemone::resources::Payload;

fn payload_kind(payload: &Payload) -> &'static str {
    match payload {
        Payload::Single { .. } => "single",
        Payload::SingleNoAction { .. } => "single (no actions)",
        Payload::SingleFrame { .. } => "single frame",
        Payload::Frames { .. } => "frames",
    }
}

fn inspect(filename: &str) -> AResult<()> {
    let bytes = std::fs::read(filename)?;
    let animation = anemone::Animation::decode(&bytes)
        .with_context(|| format!("Can\u{2019}t decode {}", filename))?;

    println!(
        "{}: version {:?}, {} fps",
        filename, animation.version, animation.frame_rate
    );

    if let Some(texture) = &animation.texture {
        println!("  atlas {} (crc {})", texture.name, texture.crc);
    }

    if let Some(index) = &animation.index {
        if let Some(scale) = index.scale {
            println!("  scale {}", scale);
        }
        for name in &index.file_names {
            println!("  preloads {}", name);
        }
        for file in &index.animation_files {
            println!("  file {} (crc {}, index {})", file.name, file.crc, file.file_index);
        }
    }

    println!("  {} shapes", animation.shapes.len());
    for sprite in &animation.sprites {
        println!(
            "  sprite {} {:?}: {}, {} frame(s)",
            sprite.id,
            sprite.name.as_deref().unwrap_or("-"),
            payload_kind(&sprite.payload),
            sprite.frame_count(),
        );
    }

    if let Some(table) = &animation.transform {
        println!(
            "  transform table: {} colors, {} rotations, {} translations",
            table.colors.len(),
            table.rotations.len(),
            table.translations.len(),
        );
        for action in &table.actions {
            println!("  action {:?}", action);
        }
    }

    for import in &animation.imports {
        println!("  import {} {} (file {})", import.id, import.name, import.file_index);
    }

    Ok(())
}

fn main() -> AResult<()> {
    println!("{} file inspector", anemone::name(true));

    let args = pico_args::Arguments::from_env();
    let files = args.free()?;
    if files.is_empty() {
        println!("Usage: inspect <anm file>...");
        exit(1);
    }

    for filename in &files {
        inspect(filename).with_context(|| format!("Can\u{2019}t inspect {}", filename))?;
    }

    Ok(())
}
