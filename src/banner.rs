// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
  ___   ____ ____    ____            _        _
 / _ \ / ___|  _ \  |  _ \ ___  _ __| |_ __ _| |
| | | | |   | |_) | | |_) / _ \| '__| __/ _` | |
| |_| | |___|  _ <  |  __/ (_) | |  | || (_| | |
 \___/ \____|_| \_\ |_|   \___/|_|   \__\__,_|_|

    Upload front end for the OCR service
"#;
    println!("{}", banner);
}
