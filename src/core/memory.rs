//=========================================================================
// Memory Statistics
//=========================================================================
//
// Tagged allocation bookkeeping and a human-readable usage report.
//
// Subsystems report how many bytes they hold under a `MemoryTag`; the
// engine prints the per-tag totals at startup and shutdown. Nothing here
// allocates on anyone's behalf: the counters are informational only.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt::Write;

//=== External Crates =====================================================

use log::warn;

//=== MemoryTag ===========================================================

/// Category under which an allocation is accounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryTag {
    /// Unclassified; using it logs a warning.
    Unknown,
    Array,
    DynArray,
    Dict,
    RingQueue,
    Bst,
    String,
    Application,
    Job,
    Texture,
    MaterialInstance,
    Renderer,
    Game,
    Transform,
    Entity,
    EntityNode,
    Scene,
}

impl MemoryTag {
    /// Number of tags.
    pub const COUNT: usize = 17;

    /// All tags in report order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Unknown,
        Self::Array,
        Self::DynArray,
        Self::Dict,
        Self::RingQueue,
        Self::Bst,
        Self::String,
        Self::Application,
        Self::Job,
        Self::Texture,
        Self::MaterialInstance,
        Self::Renderer,
        Self::Game,
        Self::Transform,
        Self::Entity,
        Self::EntityNode,
        Self::Scene,
    ];

    /// Upper-case label used in the usage report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Array => "ARRAY",
            Self::DynArray => "DARRAY",
            Self::Dict => "DICT",
            Self::RingQueue => "RING_QUEUE",
            Self::Bst => "BST",
            Self::String => "STRING",
            Self::Application => "APPLICATION",
            Self::Job => "JOB",
            Self::Texture => "TEXTURE",
            Self::MaterialInstance => "MAT_INST",
            Self::Renderer => "RENDERER",
            Self::Game => "GAME",
            Self::Transform => "TRANSFORM",
            Self::Entity => "ENTITY",
            Self::EntityNode => "ENTITY_NODE",
            Self::Scene => "SCENE",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

//=== MemoryStats =========================================================

/// Running byte totals, overall and per tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStats {
    total_allocated: u64,
    tagged: [u64; MemoryTag::COUNT],
}

impl MemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Bookkeeping ------------------------------------------------------

    /// Accounts `size` bytes under `tag`.
    pub fn record_allocation(&mut self, size: u64, tag: MemoryTag) {
        if tag == MemoryTag::Unknown {
            warn!(target: "memory", "Allocation recorded as Unknown; re-class this allocation");
        }

        self.total_allocated = self.total_allocated.saturating_add(size);
        self.tagged[tag.index()] = self.tagged[tag.index()].saturating_add(size);
    }

    /// Releases `size` bytes from `tag`. Totals never go below zero.
    pub fn record_free(&mut self, size: u64, tag: MemoryTag) {
        if tag == MemoryTag::Unknown {
            warn!(target: "memory", "Free recorded as Unknown; re-class this allocation");
        }

        self.total_allocated = self.total_allocated.saturating_sub(size);
        self.tagged[tag.index()] = self.tagged[tag.index()].saturating_sub(size);
    }

    //--- Queries ----------------------------------------------------------

    pub fn total_allocated(&self) -> u64 {
        self.total_allocated
    }

    pub fn tagged(&self, tag: MemoryTag) -> u64 {
        self.tagged[tag.index()]
    }

    /// Multi-line report, one line per tag, sizes scaled to B/KiB/MiB/GiB.
    pub fn usage_report(&self) -> String {
        let mut report = String::from("System memory use (tagged):\n");
        for tag in MemoryTag::ALL {
            // Writing into a String cannot fail
            let _ = writeln!(report, "  {:<11}: {}", tag.label(), format_bytes(self.tagged(tag)));
        }
        report
    }
}

//--- Helpers -------------------------------------------------------------

fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    let (amount, unit) = if bytes >= GIB {
        (bytes as f64 / GIB as f64, "GiB")
    } else if bytes >= MIB {
        (bytes as f64 / MIB as f64, "MiB")
    } else if bytes >= KIB {
        (bytes as f64 / KIB as f64, "KiB")
    } else {
        (bytes as f64, "B")
    };

    format!("{:.2}{}", amount, unit)
}

//=========================================================================
// Unit Tests
//=========================================================================
