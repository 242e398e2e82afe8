use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(about = "Periksa apakah sebuah situs aman dikunjungi dengan Google Safe Browsing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Batas waktu pemeriksaan dalam detik (menggantikan SITECHECK_TIMEOUT_SECS)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Periksa satu atau beberapa URL secara berurutan
    Check {
        /// URL yang diperiksa (skema opsional, https:// dipakai bila tidak ada)
        #[arg(required = true)]
        urls: Vec<String>,
        /// Keluaran dalam format JSON
        #[arg(long)]
        json: bool,
    },
    /// Mulai sesi interaktif dengan riwayat pemeriksaan
    Shell,
    /// Kelola kunci API Safe Browsing di keychain sistem operasi
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Buat skrip pelengkapan shell
    Completions {
        /// Shell tujuan
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Berkas keluaran opsional (stdout bila tidak diisi)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Simpan kunci API di keychain
    Set {
        /// Kunci API Google Safe Browsing
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Tampilkan sumber kunci API yang akan dipakai
    Status,
    /// Hapus kunci API yang tersimpan
    Clear,
}
