//! Key store and slot allocation.
//!
//! The key store is a fixed region of memory shared with the consumer of the
//! unwrapped keys. It is laid out as little-endian 32-bit words:
//!
//! ```text
//! header:  | tag | version | capacity | reserved |
//! slot i:  | status | key length | key || metadata || unused |
//!                                  <-------- KEY_SPACE -------->
//! ```
//!
//! A slot whose status word is [`STATUS_FULL`] is occupied, any other value
//! means free. Slots are never freed here: the consumer releases a slot by
//! overwriting its status word.

use crate::{Error, Result};

pub const KEY_STORE_TAG: u32 = 0x5253_4B53;
pub const KEY_STORE_VERSION: u32 = 1;

/// Occupied sentinel.
pub const STATUS_FULL: u32 = 0x973A_FB51;
pub const STATUS_FREE: u32 = 0;

pub const MAX_KEY_SLOTS: usize = 32;
/// Largest key a slot holds, an AES-256 key.
pub const MAX_KEY_SIZE: usize = 32;
pub const KEY_METADATA_SIZE: usize = 32;

pub const HEADER_SIZE: usize = 16;
const CAPACITY_OFFSET: usize = 8;

const STATUS_OFFSET: usize = 0;
const KEY_LEN_OFFSET: usize = 4;
const KEY_OFFSET: usize = 8;
/// Key followed directly by its metadata.
pub const KEY_SPACE: usize = MAX_KEY_SIZE + KEY_METADATA_SIZE;
pub const SLOT_SIZE: usize = KEY_OFFSET + KEY_SPACE;

/// Region size needed for `capacity` slots.
pub const fn region_size(capacity: usize) -> usize {
    HEADER_SIZE + capacity * SLOT_SIZE
}

fn read_word(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..][..4]);
    u32::from_le_bytes(word)
}

fn write_word(bytes: &mut [u8], offset: usize, word: u32) {
    bytes[offset..][..4].copy_from_slice(&word.to_le_bytes());
}

fn check_capacity(region_len: usize, capacity: usize) -> Result<()> {
    if capacity == 0 || capacity > MAX_KEY_SLOTS || region_size(capacity) > region_len {
        return Err(Error::KeyStoreSize);
    }
    Ok(())
}

/// View of the key-store region.
pub struct KeyStore<'r> {
    region: &'r mut [u8],
    capacity: usize,
}

impl<'r> KeyStore<'r> {
    /// Attach to an initialized region; the capacity comes from its header.
    pub fn new(region: &'r mut [u8]) -> Result<Self> {
        if region.len() < HEADER_SIZE {
            return Err(Error::KeyStoreSize);
        }
        let capacity = read_word(region, CAPACITY_OFFSET) as usize;
        check_capacity(region.len(), capacity)?;
        Ok(Self { region, capacity })
    }

    /// Write a fresh header and mark every slot free.
    pub fn format(region: &'r mut [u8], capacity: usize) -> Result<Self> {
        check_capacity(region.len(), capacity)?;
        region[..region_size(capacity)].fill(0);
        write_word(region, 0, KEY_STORE_TAG);
        write_word(region, 4, KEY_STORE_VERSION);
        write_word(region, CAPACITY_OFFSET, capacity as u32);
        info!("key store formatted with {} slots", capacity);
        Ok(Self { region, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot(&self, index: usize) -> Result<&[u8]> {
        if index >= self.capacity {
            return Err(Error::InvalidParam);
        }
        Ok(&self.region[HEADER_SIZE + index * SLOT_SIZE..][..SLOT_SIZE])
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        if index >= self.capacity {
            return Err(Error::InvalidParam);
        }
        Ok(&mut self.region[HEADER_SIZE + index * SLOT_SIZE..][..SLOT_SIZE])
    }

    pub fn status(&self, index: usize) -> Result<u32> {
        Ok(read_word(self.slot(index)?, STATUS_OFFSET))
    }

    pub fn is_occupied(&self, index: usize) -> Result<bool> {
        Ok(self.status(index)? == STATUS_FULL)
    }

    pub(crate) fn set_status(&mut self, index: usize, status: u32) -> Result<()> {
        write_word(self.slot_mut(index)?, STATUS_OFFSET, status);
        Ok(())
    }

    /// Length in bytes of the key stored in the slot.
    pub fn key_len(&self, index: usize) -> Result<usize> {
        let len = read_word(self.slot(index)?, KEY_LEN_OFFSET) as usize;
        if len > MAX_KEY_SIZE {
            return Err(Error::InvalidParam);
        }
        Ok(len)
    }

    pub(crate) fn set_key_len(&mut self, index: usize, len: usize) -> Result<()> {
        if len > MAX_KEY_SIZE {
            return Err(Error::InvalidParam);
        }
        write_word(self.slot_mut(index)?, KEY_LEN_OFFSET, len as u32);
        Ok(())
    }

    pub fn key(&self, index: usize) -> Result<&[u8]> {
        let len = self.key_len(index)?;
        Ok(&self.slot(index)?[KEY_OFFSET..][..len])
    }

    /// Metadata, which sits right after the key bytes.
    pub fn metadata(&self, index: usize) -> Result<&[u8]> {
        let len = self.key_len(index)?;
        Ok(&self.slot(index)?[KEY_OFFSET + len..][..KEY_METADATA_SIZE])
    }

    /// Key and metadata space of the slot.
    pub(crate) fn key_space_mut(&mut self, index: usize) -> Result<&mut [u8]> {
        Ok(&mut self.slot_mut(index)?[KEY_OFFSET..])
    }
}

/// Remembers where to continue looking for a free slot.
///
/// The cursor moves past each slot as it is filled, so consecutive
/// allocations do not rescan the occupied prefix. A slot freed behind the
/// cursor is only found again once the cursor wraps around.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SlotAllocator {
    cursor: usize,
}

impl SlotAllocator {
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First free slot at or after the cursor, wrapping around once.
    ///
    /// The cursor is left at the slot found.
    pub fn find_free(&mut self, store: &KeyStore<'_>) -> Result<usize> {
        let capacity = store.capacity();
        check_capacity(store.region.len(), capacity)?;
        if self.cursor >= capacity {
            self.cursor = 0;
        }

        for offset in 0..capacity {
            let index = (self.cursor + offset) % capacity;
            if !store.is_occupied(index)? {
                self.cursor = index;
                debug!("free key slot {}", index);
                return Ok(index);
            }
        }

        warn!("no free key slot");
        Err(Error::NoFreeKeySlot)
    }

    /// Write the occupied sentinel and move the cursor past the slot.
    pub fn mark_occupied(&mut self, store: &mut KeyStore<'_>, index: usize) -> Result<()> {
        store.set_status(index, STATUS_FULL)?;
        self.cursor = (index + 1) % store.capacity();
        Ok(())
    }
}
