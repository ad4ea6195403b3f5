#![doc = r#"
thumbkit — crop-to-fit thumbnails stored next to their originals.

This crate turns an uploaded image into a set of fixed-size thumbnail variants. Each
variant is cropped around the center to the target aspect ratio and resized with an
antialiasing filter, then stored beside the original as `<basename>.<w>x<h>.<ext>`.
Deleting the original removes the variants. It powers the `thumbkit` CLI and can be
embedded in your own Rust applications.

Generate a single thumbnail
---------------------------
```rust,no_run
use thumbkit::{generate_thumbnail, TargetSize};

fn main() -> thumbkit::Result<()> {
    let source = std::fs::read("photo.jpg")?;
    // "JPG" and "jpeg" are the same format
    let thumb = generate_thumbnail(&source, TargetSize::new(125, 125)?, "JPG")?;
    std::fs::write("photo.125x125.jpg", thumb)?;
    Ok(())
}
```

Save an original with all of its thumbnails
-------------------------------------------
```rust,no_run
use thumbkit::{FileSystemStorage, ImageWithThumbsField, TargetSize};

fn main() -> thumbkit::Result<()> {
    let storage = FileSystemStorage::new("/srv/media", "/media/");
    let field = ImageWithThumbsField::new(vec![
        TargetSize::new(125, 125)?,
        TargetSize::new(300, 200)?,
    ]);

    let content = std::fs::read("upload.jpg")?;
    let mut file = field.bind(&storage, None);
    let stored = file.save("images/photo.jpg", &content)?;
    // images/photo.jpg, images/photo.125x125.jpg, images/photo.300x200.jpg
    println!("{stored} -> {:?}", file.thumbnail_urls()?);

    file.delete()?;
    Ok(())
}
```

Error handling
--------------
All public functions return `thumbkit::Result<T>`; match on `thumbkit::Error` to handle
specific cases.

```rust,no_run
use thumbkit::{generate_thumbnail, Error, TargetSize};

fn main() {
    let size = TargetSize { width: 64, height: 64 };
    match generate_thumbnail(b"not an image", size, "png") {
        Ok(_) => {}
        Err(Error::Decode(e)) => eprintln!("bad upload: {e}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level file and directory entry points.
- [`field`] — the image-with-thumbnails field over any [`Storage`].
- [`core`] — crop planning, resizing and the thumbnail generator.
- [`io`] — storage backends and encoders.
- [`naming`] — thumbnail naming scheme.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod field;
pub mod io;
pub mod naming;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{ThumbnailConfig, ThumbnailOptions};
pub use crate::core::processing::crop::{CropBox, plan_crop};
pub use crate::core::processing::resize::ResizeFilter;
pub use error::{Error, Result};
pub use types::{ColorMode, Raster, TargetSize, ThumbFormat};

// Generator
pub use crate::core::processing::thumbnail::{
    decode_source, generate_thumbnail, generate_thumbnail_with_options, render_thumbnail,
};

// Storage and field
pub use field::{FieldFile, ImageWithThumbsField};
pub use io::storage::{FileSystemStorage, MemoryStorage, Storage};
pub use naming::{thumbnail_name, thumbnail_url};

// High-level API re-exports
pub use api::{
    BatchReport, SavedImage, delete_with_thumbnails, iterate_images, process_directory_to_path,
    regenerate_thumbnails, save_with_thumbnails, thumbnail_file_to_path,
};
