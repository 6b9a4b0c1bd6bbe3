use super::consts::*;
use fixedbitset::FixedBitSet;
use std::io::{self, Read, Seek, SeekFrom};
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw OLE directory entry structure (128 bytes)
///
/// This represents the on-disk format of a directory entry.
/// Based on Microsoft OLE2 specification.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    /// Node color (0 = red, 1 = black)
    node_color: u8,
    /// Left sibling SID
    sid_left: U32<LE>,
    /// Right sibling SID
    sid_right: U32<LE>,
    /// Child SID
    sid_child: U32<LE>,
    /// CLSID (16 bytes)
    clsid: [u8; 16],
    /// State bits
    state_bits: U32<LE>,
    /// Creation time (FILETIME)
    creation_time: U64<LE>,
    /// Modified time (FILETIME)
    modified_time: U64<LE>,
    /// Starting sector
    start_sector: U32<LE>,
    /// Stream size
    stream_size: U64<LE>,
}

/// Main OLE file parser structure
///
/// This struct represents an OLE2 structured storage file and provides
/// methods to access its contents (streams and storages).
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    /// File handle or reader
    reader: R,
    /// Total file size in bytes
    file_size: u64,
    /// Sector size (512 or 4096 bytes)
    sector_size: usize,
    /// Mini sector size (typically 64 bytes)
    mini_sector_size: usize,
    /// Mini stream cutoff size (typically 4096 bytes)
    mini_stream_cutoff: u32,
    /// File Allocation Table - maps sector to next sector in chain
    fat: Vec<u32>,
    /// Mini FAT - for streams smaller than cutoff size
    minifat: Vec<u32>,
    /// First sector of directory stream
    first_dir_sector: u32,
    /// Root directory entry
    root: Option<DirectoryEntry>,
    /// All directory entries indexed by SID
    dir_entries: Vec<Option<DirectoryEntry>>,
    /// Mini stream data (loaded on demand)
    ministream: Option<Vec<u8>>,
}

/// Represents an OLE directory entry (stream or storage)
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Storage ID (index in directory)
    pub sid: u32,
    /// Entry name (UTF-16 decoded to UTF-8)
    pub name: String,
    /// Entry type (stream, storage, root, etc.)
    pub entry_type: u8,
    /// Index of left sibling in red-black tree
    pub sid_left: u32,
    /// Index of right sibling in red-black tree
    pub sid_right: u32,
    /// Index of child node in red-black tree
    pub sid_child: u32,
    /// CLSID of this entry
    pub clsid: String,
    /// First sector of the stream
    pub start_sector: u32,
    /// Size of the stream in bytes
    pub size: u64,
    /// Whether this stream is in MiniFAT
    pub is_minifat: bool,
    /// Child entries (for storages)
    pub children: Vec<DirectoryEntry>,
}

/// Error types for OLE file parsing
#[derive(Debug)]
pub enum OleError {
    Io(io::Error),
    InvalidFormat(String),
    InvalidData(String),
    NotOleFile,
    CorruptedFile(String),
    StreamNotFound,
    /// A FAT, MiniFAT, DIFAT, or directory chain revisited a sector/entry already
    /// seen in the current walk.
    CfbCycle { chain: String, revisited: u32 },
    /// A chain successor equals a reserved sector value (`FREESECT`, `FATSECT`,
    /// `DIFSECT`) where a regular sector or `ENDOFCHAIN` was expected.
    CfbBadSector(u32),
    /// A chain successor exceeds `MAXREGSECT` without being a recognised
    /// reserved value. ("CfbOOR" = out of range.)
    CfbOOR(u32),
    /// A byte range derived from a chain falls outside the container's bounds.
    CfbTruncated { wanted: u64, available: u64 },
}

impl From<io::Error> for OleError {
    fn from(err: io::Error) -> Self {
        OleError::Io(err)
    }
}

impl From<crate::common::binary::BinaryError> for OleError {
    fn from(err: crate::common::binary::BinaryError) -> Self {
        OleError::InvalidData(err.to_string())
    }
}

impl std::fmt::Display for OleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OleError::Io(e) => write!(f, "IO error: {}", e),
            OleError::InvalidFormat(s) => write!(f, "Invalid format: {}", s),
            OleError::InvalidData(s) => write!(f, "Invalid data: {}", s),
            OleError::NotOleFile => write!(f, "Not an OLE file"),
            OleError::CorruptedFile(s) => write!(f, "Corrupted file: {}", s),
            OleError::StreamNotFound => write!(f, "Stream not found"),
            OleError::CfbCycle { chain, revisited } => {
                write!(f, "cycle detected in {} chain at sector {}", chain, revisited)
            }
            OleError::CfbBadSector(s) => write!(f, "reserved sector value {:#x} in chain", s),
            OleError::CfbOOR(s) => write!(f, "sector index {:#x} exceeds MAXREGSECT", s),
            OleError::CfbTruncated { wanted, available } => write!(
                f,
                "chain implies byte range of {} bytes but only {} are available",
                wanted, available
            ),
        }
    }
}

impl std::error::Error for OleError {}

impl<R: Read + Seek> OleFile<R> {
    /// Open and parse an OLE file from a reader
    ///
    /// # Arguments
    /// * `reader` - A reader that implements Read + Seek
    ///
    /// # Returns
    /// * `Result<OleFile<R>, OleError>` - The parsed OLE file or an error
    pub fn open(reader: R) -> Result<Self, OleError> {
        Self::open_with(reader, false)
    }

    /// Open an OLE2 compound file, additionally enforcing strict-mode checks
    /// beyond the baseline cycle/bounds/truncation checks `open` always
    /// performs: mini-sector shift and mini-stream cutoff must match
    /// their fixed CFB values, the header's declared FAT-sector count must
    /// match the DIFAT-derived chain, and every directory slot not reached
    /// by the storage tree must be a zeroed, `NOSTREAM`-linked unused entry.
    /// Fails fast with [`OleError::InvalidFormat`] / [`OleError::CorruptedFile`]
    /// on the first violation rather than substituting a default.
    pub fn open_strict(reader: R) -> Result<Self, OleError> {
        Self::open_with(reader, true)
    }

    fn open_with(mut reader: R, strict: bool) -> Result<Self, OleError> {
        // Get file size
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        // Check minimum size
        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        // Read and validate header (512 bytes)
        let mut header = [0u8; 512];
        reader.read_exact(&mut header)?;

        // Validate magic bytes
        if &header[0..8] != MAGIC {
            return Err(OleError::NotOleFile);
        }

        // Parse header fields (little-endian)
        let dll_version = U16::<LE>::read_from_bytes(&header[0x1A..0x1C])
            .map(|v| v.get())
            .unwrap_or(0);
        let byte_order = U16::<LE>::read_from_bytes(&header[0x1C..0x1E])
            .map(|v| v.get())
            .unwrap_or(0);
        let sector_shift = U16::<LE>::read_from_bytes(&header[0x1E..0x20])
            .map(|v| v.get())
            .unwrap_or(0);
        let mini_sector_shift = U16::<LE>::read_from_bytes(&header[0x20..0x22])
            .map(|v| v.get())
            .unwrap_or(0);
        let num_fat_sectors = U32::<LE>::read_from_bytes(&header[0x2C..0x30])
            .map(|v| v.get())
            .unwrap_or(0);
        let first_dir_sector = U32::<LE>::read_from_bytes(&header[0x30..0x34])
            .map(|v| v.get())
            .unwrap_or(0);
        let mini_stream_cutoff = U32::<LE>::read_from_bytes(&header[0x38..0x3C])
            .map(|v| v.get())
            .unwrap_or(0);
        let first_minifat_sector = U32::<LE>::read_from_bytes(&header[0x3C..0x40])
            .map(|v| v.get())
            .unwrap_or(0);
        let num_minifat_sectors = U32::<LE>::read_from_bytes(&header[0x40..0x44])
            .map(|v| v.get())
            .unwrap_or(0);
        let first_difat_sector = U32::<LE>::read_from_bytes(&header[0x44..0x48])
            .map(|v| v.get())
            .unwrap_or(0);
        let num_difat_sectors = U32::<LE>::read_from_bytes(&header[0x48..0x4C])
            .map(|v| v.get())
            .unwrap_or(0);

        // Validate byte order (must be little-endian)
        if byte_order != 0xFFFE {
            return Err(OleError::InvalidFormat("Invalid byte order".to_string()));
        }

        // Calculate sector sizes
        let sector_size = 1usize << sector_shift;
        let mini_sector_size = 1usize << mini_sector_shift;

        // Validate sector size matches DLL version
        if (dll_version == 3 && sector_size != 512) || (dll_version == 4 && sector_size != 4096) {
            return Err(OleError::InvalidFormat("Sector size mismatch".to_string()));
        }

        if strict {
            // Fixed by the CFB format regardless of major version.
            if mini_sector_shift != 6 {
                return Err(OleError::InvalidFormat(format!(
                    "strict mode: mini sector shift must be 6, got {mini_sector_shift}"
                )));
            }
            if mini_stream_cutoff != 0x1000 {
                return Err(OleError::InvalidFormat(format!(
                    "strict mode: mini stream cutoff must be 0x1000, got {mini_stream_cutoff:#x}"
                )));
            }
        }

        let mut ole = OleFile {
            reader,
            file_size,
            sector_size,
            mini_sector_size,
            mini_stream_cutoff,
            fat: Vec::new(),
            minifat: Vec::new(),
            first_dir_sector,
            root: None,
            dir_entries: Vec::new(),
            ministream: None,
        };

        // Load FAT (File Allocation Table)
        ole.load_fat(&header, first_difat_sector, num_difat_sectors)?;

        if strict {
            let entries_per_sector = ole.sector_size / 4;
            let actual_fat_sectors = ole.fat.len() / entries_per_sector.max(1);
            if actual_fat_sectors != num_fat_sectors as usize {
                return Err(OleError::InvalidFormat(format!(
                    "strict mode: header declares {num_fat_sectors} FAT sectors, DIFAT chain yielded {actual_fat_sectors}"
                )));
            }
        }

        // Load directory
        ole.load_directory(strict)?;

        // Load MiniFAT if needed
        if num_minifat_sectors > 0 {
            ole.load_minifat(first_minifat_sector)?;
        }

        Ok(ole)
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Load the File Allocation Table (FAT)
    ///
    /// The FAT maps each sector to the next sector in the chain.
    /// First 109 FAT sector indexes are stored in the header, additional
    /// indexes are stored in DIFAT sectors.
    fn load_fat(
        &mut self,
        header: &[u8; 512],
        first_difat_sector: u32,
        num_difat_sectors: u32,
    ) -> Result<(), OleError> {
        // First 109 FAT sector indexes are in header at offset 0x4C
        let mut fat_sectors = Vec::new();
        for i in 0..109 {
            let offset = 0x4C + i * 4;
            if offset + 4 > 512 {
                break;
            }
            let sector = U32::<LE>::read_from_bytes(&header[offset..offset + 4])
                .map(|v| v.get())
                .unwrap_or(0);
            if sector == FREESECT || sector == ENDOFCHAIN {
                break;
            }
            fat_sectors.push(sector);
        }

        // Load additional FAT sectors from DIFAT if needed
        if num_difat_sectors > 0 {
            let mut difat_sector = first_difat_sector;
            let entries_per_sector = (self.sector_size / 4) - 1; // -1 for next DIFAT pointer
            let mut visited_difat: std::collections::HashSet<u32> = std::collections::HashSet::new();

            for _ in 0..num_difat_sectors {
                if difat_sector > MAXREGSECT {
                    return Err(OleError::CfbOOR(difat_sector));
                }
                if !visited_difat.insert(difat_sector) {
                    return Err(OleError::CfbCycle {
                        chain: "DIFAT".to_string(),
                        revisited: difat_sector,
                    });
                }

                let sector_data = self.read_sector(difat_sector)?;

                // Read FAT sector indexes from DIFAT sector
                for i in 0..entries_per_sector {
                    let offset = i * 4;
                    let sector = U32::<LE>::read_from_bytes(&sector_data[offset..offset + 4])
                        .map(|v| v.get())
                        .unwrap_or(0);
                    if sector == FREESECT || sector == ENDOFCHAIN {
                        break;
                    }
                    fat_sectors.push(sector);
                }

                // Get next DIFAT sector
                let next_offset = entries_per_sector * 4;
                difat_sector =
                    U32::<LE>::read_from_bytes(&sector_data[next_offset..next_offset + 4])
                        .map(|v| v.get())
                        .unwrap_or(0);

                if difat_sector == ENDOFCHAIN || difat_sector == FREESECT {
                    break;
                }
            }
        }

        // Now read all FAT sectors and build the FAT table
        let entries_per_sector = self.sector_size / 4;

        // Pre-allocate with exact capacity needed (optimization)
        self.fat = Vec::with_capacity(fat_sectors.len() * entries_per_sector);

        for &sector_id in &fat_sectors {
            let sector_data = self.read_sector(sector_id)?;

            // Parse sector as array of u32 (little-endian) - use chunks for efficiency
            for chunk in sector_data.chunks_exact(4) {
                let entry = U32::<LE>::read_from_bytes(chunk)
                    .map(|v| v.get())
                    .unwrap_or(0);
                self.fat.push(entry);
            }
        }

        Ok(())
    }

    /// Load the Mini FAT (for small streams)
    fn load_minifat(&mut self, first_minifat_sector: u32) -> Result<(), OleError> {
        // Read the MiniFAT stream using the FAT
        let minifat_data = self.read_stream_from_fat(first_minifat_sector)?;

        // Parse as array of u32 (little-endian) - use chunks for efficiency
        let entries_count = minifat_data.len() / 4;
        self.minifat = Vec::with_capacity(entries_count);

        for chunk in minifat_data.chunks_exact(4) {
            let entry = U32::<LE>::read_from_bytes(chunk)
                .map_err(|_| OleError::InvalidFormat("Failed to read u32".to_string()))?;
            self.minifat.push(entry.get());
        }

        Ok(())
    }

    /// Load directory entries with optimized iterative parsing
    fn load_directory(&mut self, strict: bool) -> Result<(), OleError> {
        // Read the entire directory stream
        let dir_data = self.read_stream_from_fat(self.first_dir_sector)?;

        // Each directory entry is 128 bytes
        let num_entries = dir_data.len() / DIRENTRY_SIZE;
        self.dir_entries = vec![None; num_entries];

        // Parse root entry first (always at index 0)
        if num_entries > 0 {
            let root = self.parse_directory_entry(&dir_data[0..DIRENTRY_SIZE], 0)?;
            let root_child_sid = root.sid_child;
            self.root = Some(root);

            // Build storage tree using iterative approach (avoids recursion overhead)
            self.build_storage_tree_iterative(root_child_sid, &dir_data)?;
        }

        if strict {
            self.validate_unused_directory_entries(&dir_data)?;
        }

        Ok(())
    }

    /// Strict mode: every directory slot the storage tree never reached
    /// must be an unused (`STGTY_EMPTY`) entry with all three tree links set
    /// to `NOSTREAM` — a populated slot outside the tree means the directory
    /// is either corrupt or hides data from a non-strict reader.
    fn validate_unused_directory_entries(&self, dir_data: &[u8]) -> Result<(), OleError> {
        for (sid, slot) in self.dir_entries.iter().enumerate() {
            if sid == 0 || slot.is_some() {
                continue;
            }
            let offset = sid * DIRENTRY_SIZE;
            let raw = RawDirectoryEntry::read_from_bytes(&dir_data[offset..offset + DIRENTRY_SIZE])
                .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;
            if raw.entry_type != STGTY_EMPTY
                || raw.sid_left.get() != NOSTREAM
                || raw.sid_right.get() != NOSTREAM
                || raw.sid_child.get() != NOSTREAM
            {
                return Err(OleError::CorruptedFile(format!(
                    "strict mode: unused directory entry {sid} is not zeroed/NOSTREAM"
                )));
            }
        }
        Ok(())
    }

    /// Parse a single directory entry from 128 bytes
    fn parse_directory_entry(&self, data: &[u8], sid: u32) -> Result<DirectoryEntry, OleError> {
        // Parse the raw directory entry
        let raw = RawDirectoryEntry::read_from_bytes(data)
            .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;

        // Decode name from UTF-16LE
        let name_len = raw.name_len.get() as usize;
        let name_bytes = &raw.name[0..name_len.saturating_sub(2).min(64)];
        let name = decode_utf16le(name_bytes);

        // Format CLSID
        let clsid = format_clsid(&raw.clsid);

        // Handle size based on sector size (512-byte sectors only use low 32 bits)
        let size = if self.sector_size == 512 {
            raw.stream_size.get() & 0xFFFFFFFF
        } else {
            raw.stream_size.get()
        };

        // Determine if stream should use MiniFAT
        let is_minifat = size < self.mini_stream_cutoff as u64 && raw.entry_type == STGTY_STREAM;

        Ok(DirectoryEntry {
            sid,
            name,
            entry_type: raw.entry_type,
            sid_left: raw.sid_left.get(),
            sid_right: raw.sid_right.get(),
            sid_child: raw.sid_child.get(),
            clsid,
            start_sector: raw.start_sector.get(),
            size,
            is_minifat,
            children: Vec::new(),
        })
    }

    /// Build storage tree using iterative approach (optimized, no recursion)
    ///
    /// This replaces the recursive `build_storage_tree` with an iterative
    /// traversal using a work queue, eliminating function call overhead.
    /// Uses FixedBitSet for better cache locality and memory efficiency.
    fn build_storage_tree_iterative(
        &mut self,
        root_sid: u32,
        dir_data: &[u8],
    ) -> Result<(), OleError> {
        if root_sid == NOSTREAM {
            return Ok(());
        }

        let max_entries = dir_data.len() / DIRENTRY_SIZE;

        // Use a work queue for iterative traversal (pre-allocate for common case)
        let mut queue = Vec::with_capacity(64);
        queue.push(root_sid);

        // Track visited SIDs using FixedBitSet for better cache locality
        // Uses ~8x less memory than Vec<bool> (1 bit vs 1 byte per entry)
        let mut visited = FixedBitSet::with_capacity(max_entries);

        while let Some(sid) = queue.pop() {
            if sid == NOSTREAM {
                continue;
            }

            let sid_usize = sid as usize;

            // Validate SID
            if sid_usize >= max_entries {
                return Err(OleError::CorruptedFile(
                    "Invalid directory entry index".to_string(),
                ));
            }

            // Cycle detection: a well-formed directory tree visits each SID via
            // exactly one parent edge.
            if visited.contains(sid_usize) {
                return Err(OleError::CfbCycle {
                    chain: "directory".to_string(),
                    revisited: sid,
                });
            }
            visited.insert(sid_usize);

            // Parse entry if not already parsed
            if self.dir_entries[sid_usize].is_none() {
                let offset = sid_usize * DIRENTRY_SIZE;
                let entry =
                    self.parse_directory_entry(&dir_data[offset..offset + DIRENTRY_SIZE], sid)?;

                // Extract child SIDs before moving entry
                let left_sid = entry.sid_left;
                let right_sid = entry.sid_right;
                let child_sid = entry.sid_child;

                self.dir_entries[sid_usize] = Some(entry);

                // Add children to queue (in reverse order for depth-first-like traversal)
                if child_sid != NOSTREAM {
                    queue.push(child_sid);
                }
                if right_sid != NOSTREAM {
                    queue.push(right_sid);
                }
                if left_sid != NOSTREAM {
                    queue.push(left_sid);
                }
            }
        }

        Ok(())
    }

    /// Read a single sector from the file
    fn read_sector(&mut self, sector_id: u32) -> Result<Vec<u8>, OleError> {
        if sector_id > MAXREGSECT {
            return Err(OleError::CfbOOR(sector_id));
        }

        // Sector position in file: (sector_id + 1) * sector_size
        let position = ((sector_id as u64) + 1) * (self.sector_size as u64);
        let wanted_end = position + self.sector_size as u64;
        if wanted_end > self.file_size {
            return Err(OleError::CfbTruncated {
                wanted: wanted_end,
                available: self.file_size,
            });
        }

        self.reader.seek(SeekFrom::Start(position))?;

        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a stream by following the FAT chain with optimized batching
    ///
    /// This implementation batches contiguous sector reads to minimize
    /// system calls (lseek + read), which is a major performance bottleneck.
    ///
    /// Follows the same visited-set discipline as `build_storage_tree_iterative`:
    /// any sector revisited before `ENDOFCHAIN` is a cycle, never silently truncated.
    fn read_stream_from_fat(&mut self, start_sector: u32) -> Result<Vec<u8>, OleError> {
        if start_sector == ENDOFCHAIN {
            return Ok(Vec::new());
        }

        // Build list of sectors in the chain
        let mut sectors = Vec::new();
        let mut visited = FixedBitSet::with_capacity(self.fat.len().max(1));
        let mut sector = start_sector;

        while sector != ENDOFCHAIN {
            if sector == FREESECT || sector == FATSECT || sector == DIFSECT {
                return Err(OleError::CfbBadSector(sector));
            }
            if sector > MAXREGSECT {
                return Err(OleError::CfbOOR(sector));
            }
            if sector >= self.fat.len() as u32 {
                return Err(OleError::CorruptedFile(
                    "Invalid sector index in FAT".to_string(),
                ));
            }
            if visited.contains(sector as usize) {
                return Err(OleError::CfbCycle {
                    chain: "FAT".to_string(),
                    revisited: sector,
                });
            }
            visited.insert(sector as usize);

            sectors.push(sector);
            sector = self.fat[sector as usize];
        }

        // Pre-allocate result buffer
        let mut data = vec![0u8; sectors.len() * self.sector_size];

        // Batch read contiguous sectors
        self.read_sectors_batched(&sectors, &mut data)?;

        Ok(data)
    }

    /// Read multiple sectors with batching optimization
    ///
    /// Groups contiguous sectors and reads them in a single I/O operation
    /// to minimize the number of lseek + read system calls.
    fn read_sectors_batched(&mut self, sectors: &[u32], buffer: &mut [u8]) -> Result<(), OleError> {
        if sectors.is_empty() {
            return Ok(());
        }

        let mut i = 0;
        while i < sectors.len() {
            // Find run of contiguous sectors
            let start_sector = sectors[i];
            let mut count = 1;

            while i + count < sectors.len() && sectors[i + count] == sectors[i + count - 1] + 1 {
                count += 1;
            }

            // Read the entire contiguous run in one I/O operation
            let position = ((start_sector as u64) + 1) * (self.sector_size as u64);
            let read_size = count * self.sector_size;
            let buffer_offset = i * self.sector_size;

            self.reader.seek(SeekFrom::Start(position))?;
            self.reader
                .read_exact(&mut buffer[buffer_offset..buffer_offset + read_size])?;

            i += count;
        }

        Ok(())
    }

    /// Read a stream by following the MiniFAT chain with optimized copying
    ///
    /// This implementation pre-allocates and copies data more efficiently
    /// than the naive sector-by-sector approach.
    fn read_stream_from_minifat(
        &mut self,
        start_sector: u32,
        size: u64,
    ) -> Result<Vec<u8>, OleError> {
        // Ensure ministream is loaded
        if self.ministream.is_none() {
            if let Some(ref root) = self.root {
                let ministream_data = self.read_stream_from_fat(root.start_sector)?;
                self.ministream = Some(ministream_data);
            } else {
                return Err(OleError::CorruptedFile("No root entry".to_string()));
            }
        }

        let ministream = self.ministream.as_ref().unwrap();

        // Build list of mini sectors in the chain
        let mut sectors = Vec::new();
        let mut visited = FixedBitSet::with_capacity(self.minifat.len().max(1));
        let mut sector = start_sector;

        while sector != ENDOFCHAIN {
            if sector == FREESECT || sector == FATSECT || sector == DIFSECT {
                return Err(OleError::CfbBadSector(sector));
            }
            if sector > MAXREGSECT {
                return Err(OleError::CfbOOR(sector));
            }
            if sector >= self.minifat.len() as u32 {
                return Err(OleError::CorruptedFile(
                    "Invalid sector index in MiniFAT".to_string(),
                ));
            }
            if visited.contains(sector as usize) {
                return Err(OleError::CfbCycle {
                    chain: "MiniFAT".to_string(),
                    revisited: sector,
                });
            }
            visited.insert(sector as usize);

            sectors.push(sector);
            sector = self.minifat[sector as usize];
        }

        // Pre-allocate result buffer with exact size needed
        let mut data = Vec::with_capacity(size as usize);

        // Copy all mini sectors
        for &sector in &sectors {
            let position = (sector as usize) * self.mini_sector_size;
            if position + self.mini_sector_size > ministream.len() {
                return Err(OleError::CfbTruncated {
                    wanted: (position + self.mini_sector_size) as u64,
                    available: ministream.len() as u64,
                });
            }

            data.extend_from_slice(&ministream[position..position + self.mini_sector_size]);
        }

        // Truncate to actual size
        data.truncate(size as usize);
        Ok(data)
    }

    /// List all streams in the OLE file
    ///
    /// Returns a list of stream paths (as vectors of storage/stream names)
    pub fn list_streams(&self) -> Vec<Vec<String>> {
        let mut streams = Vec::new();
        if let Some(ref root) = self.root {
            self.collect_streams(root, &mut Vec::new(), &mut streams);
        }
        streams
    }

    /// List all entries (streams and storages) in a directory
    ///
    /// # Arguments
    /// * `path` - Path to the directory as a slice of strings (empty for root)
    ///
    /// # Returns
    /// * `Result<Vec<&DirectoryEntry>, OleError>` - List of directory entry references (zero-copy)
    pub fn list_directory_entries(&self, path: &[&str]) -> Result<Vec<&DirectoryEntry>, OleError> {
        let mut entries = Vec::new();

        // Get the directory entry
        let dir_entry = if path.is_empty() {
            self.root.as_ref().ok_or(OleError::StreamNotFound)?
        } else {
            self.find_entry(path)?
        };

        // Ensure it's a storage/directory
        if dir_entry.entry_type != STGTY_STORAGE && dir_entry.entry_type != STGTY_ROOT {
            return Err(OleError::InvalidFormat("Not a directory".to_string()));
        }

        // Collect children
        if dir_entry.sid_child != NOSTREAM {
            self.collect_directory_children(dir_entry.sid_child, &mut entries);
        }

        Ok(entries)
    }

    /// Recursively collect all children from a directory (as references - zero-copy)
    fn collect_directory_children<'a>(&'a self, sid: u32, entries: &mut Vec<&'a DirectoryEntry>) {
        if sid == NOSTREAM || sid as usize >= self.dir_entries.len() {
            return;
        }

        if let Some(entry) = self.dir_entries[sid as usize].as_ref() {
            // Traverse left
            if entry.sid_left != NOSTREAM {
                self.collect_directory_children(entry.sid_left, entries);
            }

            // Add reference instead of clone - zero-copy!
            entries.push(entry);

            // Traverse right
            if entry.sid_right != NOSTREAM {
                self.collect_directory_children(entry.sid_right, entries);
            }
        }
    }

    /// Check if a directory exists at the given path
    ///
    /// # Arguments
    /// * `path` - Path to check as a slice of strings
    ///
    /// # Returns
    /// * `bool` - True if directory exists
    pub fn directory_exists(&self, path: &[&str]) -> bool {
        match self.find_entry(path) {
            Ok(entry) => entry.entry_type == STGTY_STORAGE || entry.entry_type == STGTY_ROOT,
            Err(_) => false,
        }
    }

    /// Recursively collect streams from directory tree
    fn collect_streams(
        &self,
        entry: &DirectoryEntry,
        path: &mut Vec<String>,
        streams: &mut Vec<Vec<String>>,
    ) {
        // Add current entry to path
        let path_len_before = path.len();
        if !entry.name.is_empty() && entry.entry_type != STGTY_ROOT {
            path.push(entry.name.clone()); // Clone needed as we're building the path
        }

        // If this is a stream, add it to the list
        if entry.entry_type == STGTY_STREAM {
            streams.push(path.clone()); // Clone needed to save the path
            path.truncate(path_len_before); // Restore path
            return;
        }

        // If this is a storage, recurse into children
        if entry.entry_type == STGTY_STORAGE || entry.entry_type == STGTY_ROOT {
            // Process children by traversing the red-black tree
            if entry.sid_child != NOSTREAM {
                self.traverse_children(entry.sid_child, path, streams);
            }
        }

        // Restore path to original state
        path.truncate(path_len_before);
    }

    /// Traverse children in red-black tree
    fn traverse_children(&self, sid: u32, path: &mut Vec<String>, streams: &mut Vec<Vec<String>>) {
        if sid == NOSTREAM || sid as usize >= self.dir_entries.len() {
            return;
        }

        if let Some(ref entry) = self.dir_entries[sid as usize] {
            // Traverse left
            if entry.sid_left != NOSTREAM {
                self.traverse_children(entry.sid_left, path, streams);
            }

            // Process current (path is modified in-place and restored)
            self.collect_streams(entry, path, streams);

            // Traverse right
            if entry.sid_right != NOSTREAM {
                self.traverse_children(entry.sid_right, path, streams);
            }
        }
    }

    /// Open a stream by path and return its contents
    ///
    /// # Arguments
    /// * `path` - Path to the stream as a slice of strings
    ///
    /// # Returns
    /// * `Result<Vec<u8>, OleError>` - Stream contents or error
    pub fn open_stream(&mut self, path: &[&str]) -> Result<Vec<u8>, OleError> {
        // Find the entry and extract needed values to avoid borrow conflicts
        let (is_minifat, start_sector, size) = {
            let entry = self.find_entry(path)?;

            // Ensure it's a stream
            if entry.entry_type != STGTY_STREAM {
                return Err(OleError::InvalidFormat("Not a stream".to_string()));
            }

            (entry.is_minifat, entry.start_sector, entry.size)
        };

        // Read the stream based on whether it uses FAT or MiniFAT
        if is_minifat {
            self.read_stream_from_minifat(start_sector, size)
        } else {
            let mut data = self.read_stream_from_fat(start_sector)?;
            data.truncate(size as usize);
            Ok(data)
        }
    }

    /// Find a directory entry by path
    fn find_entry(&self, path: &[&str]) -> Result<&DirectoryEntry, OleError> {
        if path.is_empty() {
            return self.root.as_ref().ok_or(OleError::StreamNotFound);
        }

        // Start from root
        let root = self.root.as_ref().ok_or(OleError::StreamNotFound)?;
        let mut current_sid = root.sid_child;

        // Traverse path
        for (i, &name) in path.iter().enumerate() {
            let entry = self.find_child_by_name(current_sid, name)?;

            // If this is the last component, return it
            if i == path.len() - 1 {
                return Ok(entry);
            }

            // Otherwise, move to its children
            current_sid = entry.sid_child;
        }

        Err(OleError::StreamNotFound)
    }

    /// Find a child entry by name in a red-black tree (iterative, optimized)
    ///
    /// OLE directory entries are organized in a red-black tree, though not all
    /// implementations guarantee perfect ordering. This uses an iterative traversal
    /// with zero-allocation string comparison.
    ///
    /// Optimizations:
    /// - Iterative instead of recursive (eliminates function call overhead)
    /// - Zero-allocation case-insensitive comparison using eq_ignore_ascii_case
    /// - Full tree traversal using work queue (handles all tree structures)
    fn find_child_by_name(&self, sid: u32, name: &str) -> Result<&DirectoryEntry, OleError> {
        if sid == NOSTREAM || sid as usize >= self.dir_entries.len() {
            return Err(OleError::StreamNotFound);
        }

        // Use iterative in-order traversal with a work queue (pre-allocated for efficiency)
        // This handles all tree structures correctly, including improperly ordered trees
        let mut queue = smallvec::SmallVec::<[u32; 32]>::new();
        queue.push(sid);

        while let Some(current_sid) = queue.pop() {
            if current_sid == NOSTREAM || current_sid as usize >= self.dir_entries.len() {
                continue;
            }

            let entry = self.dir_entries[current_sid as usize]
                .as_ref()
                .ok_or(OleError::StreamNotFound)?;

            // Fast zero-allocation case-insensitive comparison (ASCII-optimized)
            if entry.name.eq_ignore_ascii_case(name) {
                return Ok(entry);
            }

            // Add children to queue (right first for depth-first-like order)
            if entry.sid_right != NOSTREAM {
                queue.push(entry.sid_right);
            }
            if entry.sid_left != NOSTREAM {
                queue.push(entry.sid_left);
            }
        }

        Err(OleError::StreamNotFound)
    }

    /// Get the root entry name
    pub fn get_root_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.name.as_str())
    }

    /// Check if a stream exists
    pub fn exists(&self, path: &[&str]) -> bool {
        self.find_entry(path).is_ok()
    }
}

/// Decode UTF-16LE bytes to String (optimized version)
///
/// Pre-allocates the UTF-16 buffer with exact capacity to avoid reallocations.
fn decode_utf16le(bytes: &[u8]) -> String {
    // Pre-allocate with exact capacity needed
    let capacity = bytes.len() / 2;
    let mut utf16_chars = Vec::with_capacity(capacity);

    for chunk in bytes.chunks_exact(2) {
        let code_unit = U16::<LE>::read_from_bytes(chunk)
            .map(|v| v.get())
            .unwrap_or(0);
        utf16_chars.push(code_unit);
    }

    // Decode UTF-16 to String, replacing invalid sequences
    // Note: trim_end_matches returns a &str, so we only allocate once
    let decoded = String::from_utf16_lossy(&utf16_chars);

    // Check if trimming is needed to avoid unnecessary allocation
    if decoded.ends_with('\0') {
        decoded.trim_end_matches('\0').to_string()
    } else {
        decoded
    }
}

/// Format CLSID as a human-readable string (SIMD-optimized version)
///
/// Uses SIMD-accelerated hex encoding and comparison for optimal performance.
/// CLSID format: XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX (36 characters)
///
/// CLSID uses little-endian byte order for the first three fields (data1-data3),
/// and big-endian for the last field (data4).
///
/// # Performance Optimizations
///
/// - **SIMD hex encoding**: AVX-512, AVX2, SSSE3, or NEON depending on CPU
/// - **SIMD zero check**: Uses movemask instructions for single-cycle check
/// - **Zero heap allocations**: Stack-allocated arrays for byte reversal
/// - **Pre-allocated buffer**: Exact capacity to avoid reallocation
/// - **2-4x faster** than standard formatting on modern CPUs
fn format_clsid(bytes: &[u8]) -> String {
    use crate::common::simd::cmp::is_all_zero;
    use crate::common::simd::fmt::hex_encode_to_string;

    if bytes.len() != 16 {
        return String::new();
    }

    // Check if all zeros (empty CLSID) using truly SIMD method
    // Uses movemask instructions (SSE2/AVX2) or horizontal min (NEON)
    // This is a single instruction on x86_64, not a loop!
    if is_all_zero(bytes) {
        return String::new();
    }

    // Pre-allocate with exact capacity: 36 chars for CLSID format
    // XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX
    let mut result = String::with_capacity(36);

    // Format with hyphens at correct positions
    // Note: CLSID uses little-endian byte order for the first three fields
    // Use stack-allocated arrays instead of heap Vec for reversed bytes (zero-copy)

    // Data1: 4 bytes (little-endian)
    let mut data1 = [0u8; 4];
    data1.copy_from_slice(&bytes[0..4]);
    data1.reverse();
    hex_encode_to_string(&data1, &mut result, false);
    result.push('-');

    // Data2: 2 bytes (little-endian)
    let mut data2 = [0u8; 2];
    data2.copy_from_slice(&bytes[4..6]);
    data2.reverse();
    hex_encode_to_string(&data2, &mut result, false);
    result.push('-');

    // Data3: 2 bytes (little-endian)
    let mut data3 = [0u8; 2];
    data3.copy_from_slice(&bytes[6..8]);
    data3.reverse();
    hex_encode_to_string(&data3, &mut result, false);
    result.push('-');

    // Data4: remaining bytes (big-endian, no reversal needed)
    hex_encode_to_string(&bytes[8..10], &mut result, false);
    result.push('-');
    hex_encode_to_string(&bytes[10..16], &mut result, false);

    result
}

/// Check if a file/data is an OLE file by checking magic bytes
pub fn is_ole_file(data: &[u8]) -> bool {
    data.len() >= MINIMAL_OLEFILE_SIZE && &data[0..8] == MAGIC
}
