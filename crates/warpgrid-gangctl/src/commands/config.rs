use std::path::Path;

use warpgrid_gang::GangConfig;

pub fn init() -> anyhow::Result<()> {
    print!("{}", GangConfig::default().to_toml_string()?);
    Ok(())
}

pub fn check(path: &str) -> anyhow::Result<()> {
    let config = GangConfig::from_file(Path::new(path))?;
    println!("✓ {path} is valid");
    println!("  group name label:     {}", config.labels.group_name);
    println!("  group min-size label: {}", config.labels.group_min_size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_checks_clean() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), GangConfig::default().to_toml_string().unwrap()).unwrap();
        assert!(check(file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn invalid_config_fails_check() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[labels]\ngroup_name = \"\"\n").unwrap();
        assert!(check(file.path().to_str().unwrap()).is_err());
    }
}
