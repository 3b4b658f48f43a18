use dpx_imagine::{dpx::*, image::Bitmap, DpxError, Endianness, PlaneMut, Rational};
use pixel_formats::r32g32b32a32_Sfloat;
use walkdir::WalkDir;

const DATA_OFFSET: usize = 2048;

/// A 2048 byte DPX header followed by `pixels`.
fn build_dpx(
  e: Endianness, descriptor: u8, bits: u8, width: u32, height: u32, aspect: (u32, u32),
  pixels: &[u8],
) -> Vec<u8> {
  let mut out = vec![0_u8; DATA_OFFSET];
  out[0..4].copy_from_slice(&e.u32_to_bytes(DPX_MAGIC));
  out[4..8].copy_from_slice(&e.u32_to_bytes(DATA_OFFSET as u32));
  out[0x304..0x308].copy_from_slice(&e.u32_to_bytes(width));
  out[0x308..0x30C].copy_from_slice(&e.u32_to_bytes(height));
  out[0x320] = descriptor;
  out[0x323] = bits;
  out[1628..1632].copy_from_slice(&e.u32_to_bytes(aspect.0));
  out[1632..1636].copy_from_slice(&e.u32_to_bytes(aspect.1));
  out.extend_from_slice(pixels);
  out
}

fn encode_u16s(e: Endianness, samples: &[u16]) -> Vec<u8> {
  samples.iter().flat_map(|s| e.u16_to_bytes(*s)).collect()
}

fn pack_10bit([r, g, b]: [u16; 3]) -> u32 {
  (u32::from(r) << 22) | (u32::from(g) << 12) | (u32::from(b) << 2)
}

/// Some `w*h` pixels of `[r, g, b, a]` below `max`.
fn test_pattern(width: u32, height: u32, max: u16) -> Vec<[u16; 4]> {
  let mut seed = 0x1234_u32;
  (0..width * height)
    .map(|_| {
      let mut next = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        ((seed >> 8) % (u32::from(max) + 1)) as u16
      };
      [next(), next(), next(), next()]
    })
    .collect()
}

fn assert_pixels_match(image: &DecodedImage, expected: &[[u16; 4]], with_alpha: bool) {
  let opaque = image.pixel_format.max_sample_value();
  for y in 0..image.height {
    for x in 0..image.width {
      let mut want = expected[(y * image.width + x) as usize];
      if !with_alpha {
        want[3] = opaque;
      }
      assert_eq!(image.rgba_u16(x, y), Some(want), "pixel ({x},{y}) of {:?}", image.pixel_format);
    }
  }
}

#[test]
fn test_round_trip_8bit_rgb() {
  super::init_logs();
  let (w, h) = (5, 3);
  let pattern = test_pattern(w, h, 255);
  let src: Vec<u8> = pattern.iter().flat_map(|p| [p[0] as u8, p[1] as u8, p[2] as u8]).collect();
  let image = dpx_decode(&build_dpx(Endianness::Big, 50, 8, w, h, (1, 1), &src)).unwrap();
  assert_eq!(image.pixel_format, DpxPixelFormat::Rgb24);
  assert_eq!(image.planes.len(), 1);
  // 15 byte rows get padded out to the default 32 byte alignment
  assert_eq!(image.planes[0].stride, 32);
  assert_eq!(image.row(0, 2), Some(&src[30..45]));
  assert_pixels_match(&image, &pattern, false);
}

#[test]
fn test_round_trip_8bit_rgba() {
  let (w, h) = (4, 4);
  let pattern = test_pattern(w, h, 255);
  let src: Vec<u8> = pattern.iter().flat_map(|p| p.map(|c| c as u8)).collect();
  for e in [Endianness::Big, Endianness::Little] {
    let image = dpx_decode(&build_dpx(e, 51, 8, w, h, (1, 1), &src)).unwrap();
    assert_eq!(image.pixel_format, DpxPixelFormat::Rgba32);
    assert_pixels_match(&image, &pattern, true);
  }
}

#[test]
fn test_round_trip_10bit_planar() {
  let (w, h) = (7, 3);
  let pattern = test_pattern(w, h, 1023);
  for e in [Endianness::Big, Endianness::Little] {
    let src: Vec<u8> =
      pattern.iter().flat_map(|p| e.u32_to_bytes(pack_10bit([p[0], p[1], p[2]]))).collect();
    let image = dpx_decode(&build_dpx(e, 50, 10, w, h, (1, 1), &src)).unwrap();
    assert_eq!(image.pixel_format, DpxPixelFormat::Gbrp10);
    assert_eq!(image.planes.len(), 3);
    assert_pixels_match(&image, &pattern, false);
    // first plane is green, stored native-endian
    let g0 = image.row(0, 0).map(|r| u16::from_ne_bytes([r[0], r[1]]));
    assert_eq!(g0, Some(pattern[0][1]));
  }
}

#[test]
fn test_10bit_known_word() {
  // r = 0b11_0000_0001, g = 0b00_1111_0000, b = 0b10_1010_1010
  let word: u32 = 0b1100000001_0011110000_1010101010_00;
  for e in [Endianness::Big, Endianness::Little] {
    let bytes = build_dpx(e, 50, 10, 1, 1, (0, 0), &e.u32_to_bytes(word));
    let image = dpx_decode(&bytes).unwrap();
    assert_eq!(image.sample(0, 0, 0), Some(0b11_0000_0001));
    assert_eq!(image.sample(0, 0, 1), Some(0b00_1111_0000));
    assert_eq!(image.sample(0, 0, 2), Some(0b10_1010_1010));
  }
  assert_eq!(split_10bit_word(word), [0b11_0000_0001, 0b00_1111_0000, 0b10_1010_1010]);
}

#[test]
fn test_round_trip_12bit_planar() {
  let (w, h) = (3, 4);
  let pattern = test_pattern(w, h, 4095);
  for (e, format) in
    [(Endianness::Big, DpxPixelFormat::Gbrp12Be), (Endianness::Little, DpxPixelFormat::Gbrp12Le)]
  {
    let samples: Vec<u16> = pattern.iter().flat_map(|p| [p[0], p[1], p[2]]).collect();
    let image = dpx_decode(&build_dpx(e, 50, 12, w, h, (1, 1), &encode_u16s(e, &samples))).unwrap();
    assert_eq!(image.pixel_format, format);
    assert_eq!(image.planes.len(), 3);
    assert_pixels_match(&image, &pattern, false);
  }
}

#[test]
fn test_round_trip_16bit_rgb() {
  let (w, h) = (6, 2);
  let pattern = test_pattern(w, h, u16::MAX);
  for (e, format) in
    [(Endianness::Big, DpxPixelFormat::Rgb48Be), (Endianness::Little, DpxPixelFormat::Rgb48Le)]
  {
    let samples: Vec<u16> = pattern.iter().flat_map(|p| [p[0], p[1], p[2]]).collect();
    let src = encode_u16s(e, &samples);
    let image = dpx_decode(&build_dpx(e, 50, 16, w, h, (1, 1), &src)).unwrap();
    assert_eq!(image.pixel_format, format);
    // packed 16-bit data is copied through untouched
    assert_eq!(image.row(0, 1), Some(&src[36..72]));
    assert_pixels_match(&image, &pattern, false);
  }
}

#[test]
fn test_round_trip_16bit_rgba() {
  let (w, h) = (2, 5);
  let pattern = test_pattern(w, h, u16::MAX);
  for (e, format) in
    [(Endianness::Big, DpxPixelFormat::Rgba64Be), (Endianness::Little, DpxPixelFormat::Rgba64Le)]
  {
    let samples: Vec<u16> = pattern.iter().flatten().copied().collect();
    let image = dpx_decode(&build_dpx(e, 51, 16, w, h, (1, 1), &encode_u16s(e, &samples))).unwrap();
    assert_eq!(image.pixel_format, format);
    assert_pixels_match(&image, &pattern, true);
  }
}

#[test]
fn test_parse_resolve_unpack_12bit_le() {
  let e = Endianness::Little;
  let (w, h) = (3, 2);
  let pattern = test_pattern(w, h, 4095);
  let samples: Vec<u16> = pattern.iter().flat_map(|p| [p[0], p[1], p[2]]).collect();
  let bytes = build_dpx(e, 50, 12, w, h, (4, 3), &encode_u16s(e, &samples));

  let header = parse_header(&bytes).unwrap();
  assert_eq!(header.endianness, e);
  let fmt = resolve_format(header.descriptor, header.bits_per_sample, header.endianness).unwrap();
  assert!(fmt.planar);
  let image = unpack(&bytes, &header, &fmt).unwrap();
  assert_eq!(image.pixel_format, DpxPixelFormat::Gbrp12Le);
  assert_eq!(image.aspect_ratio, Rational { num: 4, den: 3 });
  assert_eq!(image.planes.len(), 3);
  for plane in &image.planes {
    // 6 byte rows padded out to the default 32 byte alignment
    assert_eq!(plane.stride, 32);
    assert_eq!(plane.data.len(), 64);
  }
  assert_pixels_match(&image, &pattern, false);

  let short = &bytes[..bytes.len() - 1];
  let header = parse_header(short).unwrap();
  assert_eq!(unpack(short, &header, &fmt).unwrap_err(), DpxError::BufferOverread);
}

#[test]
fn test_single_channel_codes_read_as_rgb() {
  // A 2x1 single channel element has 2 bytes of data, but code 3 is read
  // as RGB and so needs 6.
  let bytes = build_dpx(Endianness::Big, 3, 8, 2, 1, (1, 1), &[10, 20]);
  assert_eq!(dpx_decode(&bytes).unwrap_err(), DpxError::BufferOverread);
  let bytes = build_dpx(Endianness::Big, 3, 8, 2, 1, (1, 1), &[10, 20, 30, 40, 50, 60]);
  assert_eq!(dpx_decode(&bytes).unwrap().rgba_u16(1, 0), Some([40, 50, 60, 255]));
}

#[test]
fn test_every_format_has_w_times_h_samples_per_channel() {
  let (w, h) = (9, 4);
  // (descriptor, bits, bytes per pixel in the file, planes)
  for (descriptor, bits, source_bytes, planes) in
    [(50, 8, 3, 1), (51, 8, 4, 1), (50, 10, 4, 3), (50, 12, 6, 3), (50, 16, 6, 1), (51, 16, 8, 1)]
  {
    let bytes = build_dpx(Endianness::Big, descriptor, bits, w, h, (1, 1), &vec![0; 9 * 4 * source_bytes]);
    let image = DpxDecoder::new(DecodeOptions::PACKED).decode(&bytes).unwrap();
    assert_eq!(image.planes.len(), planes, "{descriptor} {bits}");
    let channels = image.pixel_format.channel_count();
    let bytes_per_sample = image.pixel_format.bytes_per_sample();
    let total_samples: usize =
      image.planes.iter().map(|p| p.data.len() / bytes_per_sample).sum::<usize>();
    assert_eq!(total_samples, (w * h) as usize * channels, "{descriptor} {bits}");
    for channel in 0..channels {
      assert!((0..h).all(|y| (0..w).all(|x| image.sample(x, y, channel).is_some())));
      assert_eq!(image.sample(w, 0, channel), None);
    }
  }
}

#[test]
fn test_boundary_too_small() {
  let bytes = build_dpx(Endianness::Big, 50, 8, 1, 1, (1, 1), &[1, 2, 3]);
  assert_eq!(dpx_decode(&bytes[..1634]).unwrap_err(), DpxError::TooSmall);
  assert_eq!(parse_header(&bytes[..1634]), Err(DpxError::TooSmall));
}

#[test]
fn test_boundary_minimum_len_overreads() {
  let mut bytes = build_dpx(Endianness::Big, 50, 8, 1, 1, (1, 1), &[]);
  bytes.truncate(1635);
  bytes[4..8].copy_from_slice(&1634_u32.to_be_bytes());
  assert_eq!(dpx_decode(&bytes).unwrap_err(), DpxError::BufferOverread);
  // the aspect ratio runs past the end of such a short frame
  assert_eq!(parse_header(&bytes).unwrap().aspect_ratio, Rational::UNKNOWN);
}

#[test]
fn test_boundary_data_offset() {
  let mut bytes = build_dpx(Endianness::Little, 50, 8, 1, 1, (1, 1), &[1, 2, 3]);
  let len = bytes.len() as u32;
  bytes[4..8].copy_from_slice(&len.to_le_bytes());
  assert_eq!(dpx_decode(&bytes).unwrap_err(), DpxError::OffsetOutOfRange);
  bytes[4..8].copy_from_slice(&(len - 1).to_le_bytes());
  assert_eq!(dpx_decode(&bytes).unwrap_err(), DpxError::BufferOverread);
  bytes[4..8].copy_from_slice(&(len - 3).to_le_bytes());
  let image = dpx_decode(&bytes).unwrap();
  assert_eq!(image.rgba_u16(0, 0), Some([1, 2, 3, 255]));
}

#[test]
fn test_bad_magic_any_length() {
  for len in [1635, 4096, 1 << 20] {
    let mut bytes = vec![0_u8; len];
    bytes[..4].copy_from_slice(b"XXXX");
    assert_eq!(dpx_decode(&bytes).unwrap_err(), DpxError::BadMagic, "len {len}");
  }
}

#[test]
fn test_unsupported_combinations() {
  let cases = [
    (7, 8, DpxError::UnsupportedDescriptor(7)),
    (50, 32, DpxError::UnsupportedBitDepth(32)),
    (51, 10, DpxError::UnsupportedFormat),
    (51, 12, DpxError::UnsupportedFormat),
  ];
  for (descriptor, bits, expected) in cases {
    let bytes = build_dpx(Endianness::Big, descriptor, bits, 1, 1, (1, 1), &[0; 16]);
    let err = dpx_decode(&bytes).unwrap_err();
    assert_eq!(err, expected);
    assert!(err.is_unsupported_format());
  }
}

#[test]
fn test_aspect_ratio() {
  let decode_aspect = |aspect| {
    dpx_decode(&build_dpx(Endianness::Big, 50, 8, 1, 1, aspect, &[0; 3])).unwrap().aspect_ratio
  };
  assert_eq!(decode_aspect((0, 9)), Rational { num: 0, den: 1 });
  assert_eq!(decode_aspect((16, 0)), Rational { num: 0, den: 1 });
  assert_eq!(decode_aspect((16, 9)), Rational { num: 16, den: 9 });
  assert_eq!(decode_aspect((1920, 1080)), Rational { num: 16, den: 9 });
}

#[test]
fn test_decode_into_reused_buffer() {
  let decoder = DpxDecoder::default();
  let mut image = DecodedImage::default();
  let big = build_dpx(Endianness::Big, 50, 12, 16, 16, (1, 1), &vec![0x11; 16 * 16 * 6]);
  decoder.decode_into(&big, &mut image).unwrap();
  let small = build_dpx(Endianness::Big, 50, 12, 2, 2, (1, 1), &encode_u16s(Endianness::Big, &[7; 12]));
  decoder.decode_into(&small, &mut image).unwrap();
  assert_eq!((image.width, image.height), (2, 2));
  assert_eq!(image.rgba_u16(1, 1), Some([7, 7, 7, 4095]));
}

#[test]
fn test_borrowed_planes_without_alloc_path() {
  let e = Endianness::Big;
  let words: Vec<u8> = [[1, 2, 3], [4, 5, 6]].iter().flat_map(|p| e.u32_to_bytes(pack_10bit(*p))).collect();
  let bytes = build_dpx(e, 50, 10, 2, 1, (1, 1), &words);
  let header = parse_header(&bytes).unwrap();
  let fmt = resolve_format(header.descriptor, header.bits_per_sample, header.endianness).unwrap();
  let (mut g, mut b, mut r) = ([0_u8; 4], [0_u8; 4], [0_u8; 4]);
  let mut planes = [PlaneMut::new(&mut g, 4), PlaneMut::new(&mut b, 4), PlaneMut::new(&mut r, 4)];
  unpack_into_planes(&bytes, &header, &fmt, &mut planes).unwrap();
  let read = |p: [u8; 4]| [u16::from_ne_bytes([p[0], p[1]]), u16::from_ne_bytes([p[2], p[3]])];
  assert_eq!(read(r), [1, 4]);
  assert_eq!(read(g), [2, 5]);
  assert_eq!(read(b), [3, 6]);
}

#[test]
fn test_dpx_try_bitmap_16bit() {
  let e = Endianness::Little;
  let src = encode_u16s(e, &[0, u16::MAX, 0, u16::MAX]);
  let bitmap: Bitmap<r32g32b32a32_Sfloat> =
    dpx_try_bitmap(&build_dpx(e, 51, 16, 1, 1, (1, 1), &src)).unwrap();
  let p = bitmap.get(0, 0).unwrap();
  assert_eq!((p.r, p.g, p.b, p.a), (0.0, 1.0, 0.0, 1.0));
}

#[test]
fn test_random_bytes_do_not_panic_decoder() {
  for _ in 0..32 {
    let mut v = super::rand_bytes(4096);
    let _ = dpx_decode(&v);
    // and again with a real magic so that the rest of the header gets used
    v[..4].copy_from_slice(b"SDPX");
    let _ = dpx_decode(&v);
    v[4..8].copy_from_slice(&100_u32.to_be_bytes());
    let _ = dpx_decode(&v);
  }
}

#[test]
fn test_files_do_not_panic_decoder() {
  // iter ALL files in the test folder, even non-dpx files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if entry.file_type().is_dir() {
      continue;
    }
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = dpx_decode(&v);
  }
}
