//! Show labels and object tracks in an annotation export.

use std::path::PathBuf;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let results = super::load_annotations(&path)?;
    let summary = results.summary();

    println!("Annotation: {}", path.display());
    if let Some(ref uri) = results.input_uri {
        println!("  Input: {uri}");
    }
    println!();

    println!("Segment labels:");
    if summary.labels.is_empty() {
        println!("  (none)");
    }
    for label in &summary.labels {
        println!("  {} ({} segment(s))", label.description, label.segments);
    }
    println!();

    println!("Object tracks:");
    if summary.objects.is_empty() {
        println!("  (none)");
    }
    for object in &summary.objects {
        match (object.first, object.last) {
            (Some(first), Some(last)) => println!(
                "  {}: {} frame(s), {first} - {last}",
                object.description, object.frames
            ),
            _ => println!("  {}: {} frame(s)", object.description, object.frames),
        }
    }

    Ok(())
}
