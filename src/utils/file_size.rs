const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size, e.g. `512 B` or `1.50 MB`.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    let mut unit_index = 0;

    while value >= 1024.0 && unit_index < UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", value, UNITS[unit_index])
    }
}

/// "Selected: name (size)" line shown under a drop zone.
pub fn describe_selection(name: &str, size: Option<u64>) -> String {
    match size {
        Some(size) => format!("Selected: {} ({})", name, format_size(size)),
        None => format!("Selected: {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_not_scaled() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn larger_sizes_use_two_decimals() {
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10.00 MB");
    }

    #[test]
    fn selection_without_size() {
        assert_eq!(describe_selection("scan.png", None), "Selected: scan.png");
        assert_eq!(
            describe_selection("scan.png", Some(2048)),
            "Selected: scan.png (2.00 KB)"
        );
    }
}
