//! Prints what the decoder makes of DPX files.
//!
//! ```text
//! dpx_info <file-or-dir> [raw-output]
//! ```
//!
//! With a directory every `.dpx` file under it is checked. With a single file
//! and an output path, the decoded planes are written out one after the other
//! as raw rows (no stride padding). Set `RUST_LOG=debug` for decoder logs.

use dpx_imagine::dpx::*;

use std::{
  collections::VecDeque,
  io::Write,
  path::{Path, PathBuf},
  process::ExitCode,
};

fn main() -> ExitCode {
  env_logger::init();
  let mut args = std::env::args_os().skip(1);
  let Some(input) = args.next().map(PathBuf::from) else {
    eprintln!("usage: dpx_info <file-or-dir> [raw-output]");
    return ExitCode::FAILURE;
  };
  let raw_output = args.next().map(PathBuf::from);

  if input.is_dir() {
    let mut failures = 0_usize;
    recursive_read_dir(&input, |p| {
      if p.extension().and_then(|e| e.to_str()).map_or(true, |e| !e.eq_ignore_ascii_case("dpx")) {
        return;
      }
      if let Err(e) = describe_a_dpx_file(&p, None) {
        println!("{}: {e}", p.display());
        failures += 1;
      }
    });
    if failures == 0 {
      ExitCode::SUCCESS
    } else {
      ExitCode::FAILURE
    }
  } else {
    match describe_a_dpx_file(&input, raw_output.as_deref()) {
      Ok(()) => ExitCode::SUCCESS,
      Err(e) => {
        println!("{}: {e}", input.display());
        ExitCode::FAILURE
      }
    }
  }
}

fn describe_a_dpx_file(path: &Path, raw_output: Option<&Path>) -> Result<(), String> {
  let bytes = std::fs::read(path).map_err(|e| format!("can't read: {e}"))?;
  let header = parse_header(&bytes).map_err(|e| e.to_string())?;
  let image = DpxDecoder::default().decode(&bytes).map_err(|e| e.to_string())?;
  println!(
    "{}: {}x{} {} ({}-bit, {:?}), {} plane(s), aspect {}/{}",
    path.display(),
    image.width,
    image.height,
    image.pixel_format.name(),
    header.bits_per_sample,
    header.endianness,
    image.planes.len(),
    image.aspect_ratio.num,
    image.aspect_ratio.den,
  );
  if let Some(out_path) = raw_output {
    let file = std::fs::File::create(out_path).map_err(|e| format!("can't create output: {e}"))?;
    let mut out = std::io::BufWriter::new(file);
    for plane in 0..image.planes.len() {
      for y in 0..image.height {
        let row = image.row(plane, y).ok_or("plane is shorter than the image")?;
        out.write_all(row).map_err(|e| format!("can't write output: {e}"))?;
      }
    }
    out.flush().map_err(|e| format!("can't write output: {e}"))?;
    println!(
      "Play the output with:\nffplay -f rawvideo -pixel_format {} -video_size {}x{} {}",
      image.pixel_format.name(),
      image.width,
      image.height,
      out_path.display()
    );
  }
  Ok(())
}

/// Walks over the `path` given, which must be a directory, passing each file
/// found to `op`.
fn recursive_read_dir(path: &Path, mut op: impl FnMut(PathBuf)) {
  // queue based so that deep trees don't blow the stack
  let mut path_q = VecDeque::new();
  path_q.push_back(PathBuf::from(path));
  while let Some(path_buf) = path_q.pop_front() {
    let read_dir = match std::fs::read_dir(&path_buf) {
      Ok(read_dir) => read_dir,
      Err(e) => {
        eprintln!("Can't read_dir {}: {e}", path_buf.display());
        continue;
      }
    };
    for dir_entry in read_dir.filter_map(Result::ok) {
      match std::fs::metadata(dir_entry.path()) {
        Ok(metadata) if metadata.is_dir() => path_q.push_back(dir_entry.path()),
        Ok(metadata) if metadata.is_file() => op(dir_entry.path()),
        Ok(_) => (),
        Err(e) => eprintln!("Can't get metadata for {}: {e}", dir_entry.path().display()),
      }
    }
  }
}
