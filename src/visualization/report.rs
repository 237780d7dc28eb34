use crate::pixel::PixelArray;

pub fn print_image_info(label: &str, image: &PixelArray) {
    let (height, width, channels) = image.shape();
    println!(
        "{}: {}x{} ({} channel{}, {})",
        label,
        width,
        height,
        channels,
        if channels == 1 { "" } else { "s" },
        image.layout()
    );
}

/// Print the samples of one pixel, labelled by channel name
pub fn print_pixel(row: usize, col: usize, names: &[&str], samples: &[u8]) {
    println!("=== Pixel at row {}, column {} ===", row, col);
    for (index, value) in samples.iter().enumerate() {
        let name = names.get(index).copied().unwrap_or("?");
        println!("  [{}] {}: {}", index, name, value);
    }
}
