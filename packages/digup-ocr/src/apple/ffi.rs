use std::ffi::CStr;
use std::os::raw::c_char;

use crate::config::{RecognitionLevel, RecognitionOptions};
use crate::engine::OcrError;
use crate::region::{NormalizedBox, Observation};

extern "C" {
    fn digup_vision_recognize_rgba(
        pixels: *const u8,
        width: u32,
        height: u32,
        fast: i32,
        language_correction: i32,
        out_data: *mut *mut u8,
        out_len: *mut u64,
        out_error: *mut *mut c_char,
    ) -> i32;

    fn digup_vision_free_data(ptr: *mut u8, len: u64);
    fn digup_vision_free_error(ptr: *mut c_char);
}

/// Observation buffer handed over by the bridge, released on drop.
struct BridgeBuffer {
    ptr: *mut u8,
    len: u64,
}

impl BridgeBuffer {
    fn as_slice(&self) -> &[u8] {
        if self.ptr.is_null() || self.len == 0 {
            return &[];
        }
        // SAFETY: the bridge allocated `len` bytes at `ptr` and they stay
        // valid until `digup_vision_free_data` runs in `drop`.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len as usize) }
    }
}

impl Drop for BridgeBuffer {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { digup_vision_free_data(self.ptr, self.len) }
        }
    }
}

/// Copies out and frees the bridge's error string, if it set one.
fn take_error(ptr: *mut c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null errors are NUL-terminated strings from `strdup`.
    let message = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
    unsafe { digup_vision_free_error(ptr) };
    Some(message)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], OcrError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| OcrError::EngineError(format!("truncated {what}")))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], OcrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u8(&mut self, what: &str) -> Result<u8, OcrError> {
        Ok(self.array::<1>(what)?[0])
    }

    fn u32(&mut self, what: &str) -> Result<u32, OcrError> {
        self.array(what).map(u32::from_le_bytes)
    }

    fn f32(&mut self, what: &str) -> Result<f32, OcrError> {
        self.array(what).map(f32::from_le_bytes)
    }

    fn f64(&mut self, what: &str) -> Result<f64, OcrError> {
        self.array(what).map(f64::from_le_bytes)
    }
}

pub(crate) fn deserialize_observations(data: &[u8]) -> Result<Vec<Observation>, OcrError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = Reader { data, pos: 0 };

    let count = reader.u32("count")? as usize;
    let mut observations = Vec::with_capacity(count.min(data.len()));

    for _ in 0..count {
        let text = if reader.u8("text flag")? != 0 {
            let len = reader.u32("text length")? as usize;
            Some(String::from_utf8_lossy(reader.take(len, "text")?).into_owned())
        } else {
            None
        };

        let confidence = reader.f32("confidence")?;
        let bounding_box = NormalizedBox {
            x: reader.f64("bbox")?,
            y: reader.f64("bbox")?,
            width: reader.f64("bbox")?,
            height: reader.f64("bbox")?,
        };

        observations.push(Observation::new(text, confidence, bounding_box));
    }

    Ok(observations)
}

pub fn recognize_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: RecognitionOptions,
) -> Result<Vec<Observation>, OcrError> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(OcrError::InvalidInput(format!(
            "pixel buffer holds {} bytes, expected {expected}",
            pixels.len()
        )));
    }
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }

    let fast = i32::from(options.level == RecognitionLevel::Fast);
    let language_correction = i32::from(options.language_correction);

    let mut data: *mut u8 = std::ptr::null_mut();
    let mut len: u64 = 0;
    let mut error: *mut c_char = std::ptr::null_mut();

    let status = unsafe {
        digup_vision_recognize_rgba(
            pixels.as_ptr(),
            width,
            height,
            fast,
            language_correction,
            &mut data,
            &mut len,
            &mut error,
        )
    };
    let buffer = BridgeBuffer { ptr: data, len };

    if let Some(message) = take_error(error) {
        return Err(OcrError::EngineError(message));
    }
    if status != 0 {
        return Err(OcrError::EngineError(format!(
            "vision bridge failed with status {status}"
        )));
    }
    deserialize_observations(buffer.as_slice())
}
