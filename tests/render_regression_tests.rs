use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use perceptual_swatch::{
    cli::color_swatch::{build_swatch, generate_color_swatch, SwatchParams},
    core::file_io::FilePrefix,
};
use sha2::{Digest, Sha256};

fn compute_file_hash(file_path: &Path) -> Result<String, io::Error> {
    let mut file = File::open(file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = Vec::new();

    file.read_to_end(&mut buffer)?;

    hasher.update(&buffer);

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

fn compute_bytes_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterization_is_deterministic() {
        let params = SwatchParams::from_file("demos/brand_palette/params.json").unwrap();
        let first = build_swatch(&params).unwrap();
        let second = build_swatch(&params).unwrap();
        assert_eq!(
            compute_bytes_hash(first.texture().as_bytes()),
            compute_bytes_hash(second.texture().as_bytes())
        );
    }

    #[test]
    fn test_rainbow_render_is_reproducible() {
        let mut hashes = Vec::new();
        for run in ["first", "second"] {
            let directory: std::path::PathBuf = ["out", "render_regression", run].iter().collect();
            std::fs::create_dir_all(&directory).unwrap();
            let file_prefix = FilePrefix {
                directory_path: directory,
                file_base: String::from("rainbow"),
            };
            generate_color_swatch("demos/rainbow/params.json", file_prefix.clone()).unwrap();
            hashes.push(compute_file_hash(&file_prefix.with_suffix(".png")).unwrap());
        }
        assert_eq!(hashes[0], hashes[1]);
    }
}
