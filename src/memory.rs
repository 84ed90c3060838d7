//! Typed views into the module's linear memory
//!
//! Every accessor re-derives its backing slice from the live
//! [`wasmtime::Memory`] on each call. Memory growth (e.g. a `malloc` inside
//! the module) invalidates previously obtained slices, so none are cached
//! across call boundaries.
//!
//! A malformed pointer never reads or writes outside the module's buffer:
//! all accessors bounds-check against the current memory length and fail
//! with [`HostError::InvalidPointer`].

use wasmtime::{AsContext, AsContextMut, Memory};

use crate::error::HostError;

/// Read `len` raw bytes starting at `ptr`
pub fn read_bytes(
    memory: Memory,
    store: impl AsContext,
    ptr: u32,
    len: u32,
) -> Result<Vec<u8>, HostError> {
    if ptr == 0 {
        return Err(HostError::InvalidPointer {
            ptr,
            what: "null read pointer",
        });
    }
    let data = memory.data(&store);
    let start = ptr as usize;
    let end = start
        .checked_add(len as usize)
        .ok_or(HostError::InvalidPointer {
            ptr,
            what: "length overflow",
        })?;
    if end > data.len() {
        return Err(HostError::InvalidPointer {
            ptr,
            what: "read past end of memory",
        });
    }
    Ok(data[start..end].to_vec())
}

/// Write raw bytes through to module memory at `ptr`
pub fn write_bytes(
    memory: Memory,
    mut store: impl AsContextMut,
    ptr: u32,
    bytes: &[u8],
) -> Result<(), HostError> {
    let data = memory.data_mut(&mut store);
    let start = ptr as usize;
    let end = start
        .checked_add(bytes.len())
        .ok_or(HostError::InvalidPointer {
            ptr,
            what: "length overflow",
        })?;
    if ptr == 0 || end > data.len() {
        return Err(HostError::InvalidPointer {
            ptr,
            what: "write past end of memory",
        });
    }
    data[start..end].copy_from_slice(bytes);
    Ok(())
}

/// Read `N` consecutive little-endian 32-bit words as `u32`
pub fn read_u32_words<const N: usize>(
    memory: Memory,
    store: impl AsContext,
    ptr: u32,
) -> Result<[u32; N], HostError> {
    let bytes = read_bytes(memory, store, ptr, (N * 4) as u32)?;
    Ok(bytemuck::pod_read_unaligned::<[u32; N]>(&bytes))
}

/// Write `N` consecutive 32-bit words at `ptr`
pub fn write_u32_words<const N: usize>(
    memory: Memory,
    store: impl AsContextMut,
    ptr: u32,
    words: [u32; N],
) -> Result<(), HostError> {
    write_bytes(memory, store, ptr, bytemuck::bytes_of(&words))
}

/// Read `N` consecutive 32-bit floats
pub fn read_f32_words<const N: usize>(
    memory: Memory,
    store: impl AsContext,
    ptr: u32,
) -> Result<[f32; N], HostError> {
    let bytes = read_bytes(memory, store, ptr, (N * 4) as u32)?;
    Ok(bytemuck::pod_read_unaligned::<[f32; N]>(&bytes))
}

/// Write `N` consecutive 32-bit floats at `ptr`
pub fn write_f32_words<const N: usize>(
    memory: Memory,
    store: impl AsContextMut,
    ptr: u32,
    words: [f32; N],
) -> Result<(), HostError> {
    write_bytes(memory, store, ptr, bytemuck::bytes_of(&words))
}

/// Read a NUL-terminated string starting at `ptr`, decoded as UTF-8
///
/// The scan stops at the module's allocated memory boundary: a string the
/// module forgot to terminate fails with `InvalidPointer` instead of reading
/// arbitrary host memory. A zero pointer is rejected outright.
pub fn read_cstr(memory: Memory, store: impl AsContext, ptr: u32) -> Result<String, HostError> {
    if ptr == 0 {
        return Err(HostError::InvalidPointer {
            ptr,
            what: "null string pointer",
        });
    }
    let data = memory.data(&store);
    let start = ptr as usize;
    if start >= data.len() {
        return Err(HostError::InvalidPointer {
            ptr,
            what: "string pointer past end of memory",
        });
    }
    let len = data[start..]
        .iter()
        .position(|b| *b == 0)
        .ok_or(HostError::InvalidPointer {
            ptr,
            what: "unterminated string",
        })?;
    Ok(String::from_utf8_lossy(&data[start..start + len]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasmtime::{Engine, Instance, Linker, Module, Store};

    fn memory_fixture() -> (Store<()>, Memory) {
        let engine = Engine::default();
        let wasm = wat::parse_str(r#"(module (memory (export "memory") 1))"#).unwrap();
        let module = Module::new(&engine, wasm).unwrap();
        let linker = Linker::new(&engine);
        let mut store = Store::new(&engine, ());
        let instance: Instance = linker.instantiate(&mut store, &module).unwrap();
        let memory = instance.get_memory(&mut store, "memory").unwrap();
        (store, memory)
    }

    #[test]
    fn read_bytes_roundtrip() {
        let (mut store, memory) = memory_fixture();
        write_bytes(memory, &mut store, 64, &[1, 2, 3, 4]).unwrap();
        assert_eq!(read_bytes(memory, &store, 64, 4).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn read_bytes_out_of_bounds() {
        let (store, memory) = memory_fixture();
        // 1 page = 64KB
        let err = read_bytes(memory, &store, 65536 - 2, 4).unwrap_err();
        assert!(matches!(err, HostError::InvalidPointer { .. }));
    }

    #[test]
    fn read_bytes_null_pointer_rejected() {
        let (store, memory) = memory_fixture();
        let err = read_bytes(memory, &store, 0, 4).unwrap_err();
        assert!(matches!(err, HostError::InvalidPointer { ptr: 0, .. }));
        // Typed reads route through the same check
        assert!(read_u32_words::<4>(memory, &store, 0).is_err());
        assert!(read_f32_words::<16>(memory, &store, 0).is_err());
    }

    #[test]
    fn write_bytes_null_pointer_rejected() {
        let (mut store, memory) = memory_fixture();
        let err = write_bytes(memory, &mut store, 0, &[1]).unwrap_err();
        assert!(matches!(err, HostError::InvalidPointer { ptr: 0, .. }));
    }

    #[test]
    fn u32_words_roundtrip() {
        let (mut store, memory) = memory_fixture();
        write_u32_words(memory, &mut store, 128, [7, 8, 9]).unwrap();
        assert_eq!(read_u32_words::<3>(memory, &store, 128).unwrap(), [7, 8, 9]);
    }

    #[test]
    fn f32_words_roundtrip() {
        let (mut store, memory) = memory_fixture();
        write_f32_words(memory, &mut store, 192, [3.5, -0.25]).unwrap();
        assert_eq!(
            read_f32_words::<2>(memory, &store, 192).unwrap(),
            [3.5, -0.25]
        );
    }

    #[test]
    fn f32_words_little_endian() {
        let (mut store, memory) = memory_fixture();
        write_bytes(memory, &mut store, 256, &1.5f32.to_le_bytes()).unwrap();
        assert_eq!(read_f32_words::<1>(memory, &store, 256).unwrap(), [1.5]);
    }

    #[test]
    fn cstr_reads_until_nul() {
        let (mut store, memory) = memory_fixture();
        write_bytes(memory, &mut store, 512, b"hello\0trailing").unwrap();
        assert_eq!(read_cstr(memory, &store, 512).unwrap(), "hello");
    }

    #[test]
    fn cstr_null_pointer_fails() {
        let (store, memory) = memory_fixture();
        let err = read_cstr(memory, &store, 0).unwrap_err();
        assert!(matches!(err, HostError::InvalidPointer { ptr: 0, .. }));
    }

    #[test]
    fn cstr_unterminated_stops_at_boundary() {
        let (mut store, memory) = memory_fixture();
        // Fill the tail of the page with non-zero bytes, no terminator
        let tail = 65536 - 16;
        write_bytes(memory, &mut store, tail, &[0xAA; 16]).unwrap();
        let err = read_cstr(memory, &store, tail).unwrap_err();
        assert!(matches!(err, HostError::InvalidPointer { .. }));
    }
}
