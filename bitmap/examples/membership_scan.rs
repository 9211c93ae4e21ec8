use bitmap::{clock, BitMapConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), bitmap::ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BitMapConfig::from_json(r#"{"capacity": 3000, "memory_limit_bytes": 4096}"#)?;
    println!("Planned: {:?}", config.plan()?);

    let start = clock::monotonic_millis();
    let mut map = config.build()?;
    for key in [59, 51, 11, 13, 13, 17, 19, 59, 6, 72] {
        map.add(key)?;
    }

    for key in [59, 51, 6, 8] {
        println!("has({key}) = {}", map.has(key)?);
    }

    // Walk the raw words to recover members in ascending order
    let bits = u64::from(map.word_width().bits());
    let mut members = Vec::new();
    for index in 0..map.word_count() as u64 {
        let mut word = map.get(index)?;
        while word != 0 {
            let offset = u64::from(word.trailing_zeros());
            members.push(index * bits + offset);
            word &= word - 1;
        }
    }

    println!("Members: {members:?}");
    println!("Done in {}ms", clock::elapsed_millis(start));

    Ok(())
}
