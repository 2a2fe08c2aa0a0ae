pub fn run() -> anyhow::Result<()> {
    println!("novel-ads {}", env!("CARGO_PKG_VERSION"));
    println!("Ad strategy engine for paginated novel readers");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
