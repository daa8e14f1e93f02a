//! Synthetic package builder for integration tests.
//!
//! Writes packages at file version 522 (legacy version −7), the last UE4
//! layout, with every table stored out of line after the header.

#![allow(dead_code)]

pub const MAGIC: u32 = 0x9E2A_83C1;
pub const FILTER_EDITOR_ONLY: u32 = 0x8000_0000;

#[derive(Debug, Default)]
pub struct Writer {
    pub buf: Vec<u8>,
}

impl Writer {
    pub fn pos(&self) -> usize {
        self.buf.len()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i64(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.buf.resize(self.buf.len() + n, 0);
        self
    }

    pub fn name(&mut self, index: i32) -> &mut Self {
        self.i32(index).u32(0)
    }

    /// Empty strings are written as a bare zero length
    pub fn string(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.i32(0);
        }
        self.i32(s.len() as i32 + 1);
        self.buf.extend_from_slice(s.as_bytes());
        self.u8(0)
    }

    pub fn wide_string(&mut self, s: &str) -> &mut Self {
        let units: Vec<u16> = s.encode_utf16().chain(Some(0)).collect();
        self.i32(-(units.len() as i32));
        for unit in units {
            self.u16(unit);
        }
        self
    }

    pub fn patch_i32(&mut self, at: usize, v: i32) {
        self.buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    pub fn patch_i64(&mut self, at: usize, v: i64) {
        self.buf[at..at + 8].copy_from_slice(&v.to_le_bytes());
    }
}

#[derive(Debug, Clone)]
pub struct Export {
    pub class_index: i32,
    pub object_name: i32,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub class_package: i32,
    pub class_name: i32,
    pub object_name: i32,
}

#[derive(Debug, Default, Clone)]
pub struct Package {
    pub folder_name: String,
    pub wide_folder_name: bool,
    pub package_flags: u32,
    pub names: Vec<String>,
    pub exports: Vec<Export>,
    pub imports: Vec<Import>,
    /// Store the import map before the export map and the name table last
    pub reverse_tables: bool,
}

impl Package {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn export(mut self, class_index: i32, object_name: i32, payload: Vec<u8>) -> Self {
        self.exports.push(Export {
            class_index,
            object_name,
            payload,
        });
        self
    }

    pub fn import(mut self, class_package: i32, class_name: i32, object_name: i32) -> Self {
        self.imports.push(Import {
            class_package,
            class_name,
            object_name,
        });
        self
    }

    fn editor(&self) -> bool {
        self.package_flags & FILTER_EDITOR_ONLY == 0
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.u32(MAGIC).i32(-7).i32(0).i32(522).i32(0);
        w.i32(0); // custom versions
        w.i32(0); // total header size
        if self.wide_folder_name {
            w.wide_string(&self.folder_name);
        } else {
            w.string(&self.folder_name);
        }
        w.u32(self.package_flags);

        let names_at = w.pos();
        w.i32(self.names.len() as i32).i32(0);
        w.i32(0).i32(0); // soft object paths
        if self.editor() {
            w.string("");
        }
        w.i32(0).i32(0); // gatherable text
        let exports_at = w.pos();
        w.i32(self.exports.len() as i32).i32(0);
        let imports_at = w.pos();
        w.i32(self.imports.len() as i32).i32(0);
        w.i32(0); // depends
        w.i32(0).i32(0); // soft package references
        w.i32(0); // searchable names
        w.i32(0); // thumbnails
        w.zeros(16);
        if self.editor() {
            w.zeros(16);
        }
        w.i32(0); // generations
        for _ in 0..2 {
            w.u16(4).u16(27).u16(2).u32(18_319_896).string("++UE4+Release-4.27");
        }
        w.u32(0).i32(0).u32(0).i32(0);
        w.i32(0).i64(0).i32(0);
        w.i32(0); // chunk ids
        w.i32(0).i32(0); // preload dependencies

        let mut serial_slots = Vec::new();
        let write_names = |w: &mut Writer| {
            let at = w.pos() as i32;
            w.patch_i32(names_at + 4, at);
            for name in &self.names {
                w.string(name).u32(0);
            }
        };
        let write_imports = |w: &mut Writer| {
            let at = w.pos() as i32;
            w.patch_i32(imports_at + 4, at);
            for import in &self.imports {
                w.name(import.class_package)
                    .name(import.class_name)
                    .i32(0)
                    .name(import.object_name);
                if self.editor() {
                    w.name(0);
                }
            }
        };

        if !self.reverse_tables {
            write_names(&mut w);
        } else {
            write_imports(&mut w);
        }

        let at = w.pos() as i32;
        w.patch_i32(exports_at + 4, at);
        for export in &self.exports {
            w.i32(export.class_index).i32(0).i32(0);
            w.name(export.object_name).i32(0).u32(0);
            serial_slots.push(w.pos());
            w.i64(0).i64(0);
            w.i32(0).i32(0).i32(0);
            w.zeros(16);
            w.u32(0);
            w.i32(0).i32(0);
            w.i32(-1).i32(0).i32(0).i32(0).i32(0);
        }

        if !self.reverse_tables {
            write_imports(&mut w);
        } else {
            write_names(&mut w);
        }

        for (export, slot) in self.exports.iter().zip(serial_slots) {
            let offset = w.pos() as i64;
            w.patch_i64(slot, export.payload.len() as i64);
            w.patch_i64(slot + 8, offset);
            w.buf.extend_from_slice(&export.payload);
        }

        w.buf
    }
}

/// One `IntProperty` tag named by `name`, its 4 value bytes, then the terminator
pub fn int_property_stream(name: i32, int_property: i32, none: i32, value: i32) -> Vec<u8> {
    let mut w = Writer::default();
    w.name(name).name(int_property).i32(4).i32(0).u8(0);
    w.i32(value);
    w.name(none);
    w.buf
}
