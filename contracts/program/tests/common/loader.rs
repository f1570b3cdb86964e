//! In-process program invocation over the runtime's serialized input layout.
//!
//! Accounts live in a `Bank` between calls. Each call lays them out the way
//! the loader hands them to the entrypoint, lets pinocchio deserialize the
//! buffer into `AccountInfo`s and copies account data back afterwards.

use std::collections::BTreeMap;
use std::mem::MaybeUninit;
use std::rc::Rc;

use acme_program::env::{Env, ManualClock, RecordingSink};
use acme_program::processor;
use acme_program::AcmeInstruction;
use acme_state::AccountState;
use pinocchio::{
    account_info::AccountInfo, entrypoint::deserialize, program_error::ProgramError,
    pubkey::Pubkey, ProgramResult,
};

const MAX_ACCOUNTS: usize = 8;
const NON_DUP_MARKER: u8 = u8::MAX;
const MAX_PERMITTED_DATA_INCREASE: usize = 10 * 1024;
const LAMPORTS: u64 = 1_000_000_000;

/// Owner of plain wallets.
pub const SYSTEM_PROGRAM: Pubkey = [0u8; 32];

#[derive(Clone, Debug)]
pub struct BankAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

/// Account reference passed with an instruction.
#[derive(Clone, Copy, Debug)]
pub struct Meta {
    pub key: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl Meta {
    pub fn signer(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: true,
            is_writable: true,
        }
    }

    pub fn writable(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn readonly(key: Pubkey) -> Self {
        Self {
            key,
            is_signer: false,
            is_writable: false,
        }
    }
}

pub struct Bank {
    pub accounts: BTreeMap<Pubkey, BankAccount>,
    pub clock: Rc<ManualClock>,
    pub events: Rc<RecordingSink>,
    env: Env,
}

impl Bank {
    pub fn new(now: i64) -> Self {
        let clock = Rc::new(ManualClock::new(now));
        let events = Rc::new(RecordingSink::new());
        let env = Env::new(clock.clone(), events.clone());
        Self {
            accounts: BTreeMap::new(),
            clock,
            events,
            env,
        }
    }

    /// Zeroed account of `space` bytes owned by the program.
    pub fn create_state_account(&mut self, key: Pubkey, space: usize) {
        self.create_account(key, acme_program::ID, space);
    }

    pub fn create_account(&mut self, key: Pubkey, owner: Pubkey, space: usize) {
        self.accounts.insert(
            key,
            BankAccount {
                owner,
                data: vec![0u8; space],
            },
        );
    }

    pub fn data(&self, key: &Pubkey) -> &[u8] {
        self.accounts
            .get(key)
            .map(|account| account.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn load<T: AccountState>(&self, key: &Pubkey) -> anyhow::Result<T> {
        Ok(T::load(self.data(key))?)
    }

    pub fn process(&mut self, metas: &[Meta], instruction: &AcmeInstruction) -> ProgramResult {
        let data = instruction.pack()?;
        self.process_raw(metas, &data)
    }

    pub fn process_raw(&mut self, metas: &[Meta], instruction_data: &[u8]) -> ProgramResult {
        let (mut buffer, offsets) = self.serialize(metas, instruction_data);

        const UNINIT: MaybeUninit<AccountInfo> = MaybeUninit::<AccountInfo>::uninit();
        let mut infos = [UNINIT; MAX_ACCOUNTS];
        let result = unsafe {
            let (program_id, count, data) =
                deserialize::<MAX_ACCOUNTS>(buffer.as_mut_ptr() as *mut u8, &mut infos);
            let accounts = std::slice::from_raw_parts(infos.as_ptr() as *const AccountInfo, count);
            processor::process_with_env(program_id, accounts, data, &self.env)
        };

        let bytes = unsafe {
            std::slice::from_raw_parts(buffer.as_ptr() as *const u8, buffer.len() * 8)
        };
        for (key, offset) in offsets {
            if let Some(account) = self.accounts.get_mut(&key) {
                let len = account.data.len();
                account.data.copy_from_slice(&bytes[offset..offset + len]);
            }
        }
        result
    }

    /// Lays out `metas` as the loader does. Returns the u64-aligned buffer
    /// and the data offset of every distinct account.
    fn serialize(&self, metas: &[Meta], instruction_data: &[u8]) -> (Vec<u64>, Vec<(Pubkey, usize)>) {
        let mut bytes = Vec::new();
        let mut offsets: Vec<(Pubkey, usize)> = Vec::new();
        bytes.extend_from_slice(&(metas.len() as u64).to_le_bytes());

        for (index, meta) in metas.iter().enumerate() {
            if let Some(first) = metas[..index].iter().position(|m| m.key == meta.key) {
                bytes.push(first as u8);
                bytes.extend_from_slice(&[0u8; 7]);
                continue;
            }
            let (owner, data) = match self.accounts.get(&meta.key) {
                Some(account) => (account.owner, account.data.as_slice()),
                None => (SYSTEM_PROGRAM, &[][..]),
            };
            bytes.push(NON_DUP_MARKER);
            bytes.push(meta.is_signer as u8);
            bytes.push(meta.is_writable as u8);
            bytes.push(0);
            bytes.extend_from_slice(&[0u8; 4]);
            bytes.extend_from_slice(&meta.key);
            bytes.extend_from_slice(&owner);
            bytes.extend_from_slice(&LAMPORTS.to_le_bytes());
            bytes.extend_from_slice(&(data.len() as u64).to_le_bytes());
            offsets.push((meta.key, bytes.len()));
            bytes.extend_from_slice(data);
            bytes.resize(bytes.len() + MAX_PERMITTED_DATA_INCREASE, 0);
            bytes.resize(bytes.len().next_multiple_of(8), 0);
            bytes.extend_from_slice(&0u64.to_le_bytes());
        }

        bytes.extend_from_slice(&(instruction_data.len() as u64).to_le_bytes());
        bytes.extend_from_slice(instruction_data);
        bytes.extend_from_slice(&acme_program::ID);

        let mut buffer = vec![0u64; bytes.len().div_ceil(8)];
        for (word, chunk) in buffer.iter_mut().zip(bytes.chunks(8)) {
            let mut raw = [0u8; 8];
            raw[..chunk.len()].copy_from_slice(chunk);
            *word = u64::from_ne_bytes(raw);
        }
        (buffer, offsets)
    }
}

/// `ProgramError` for a program-level failure.
pub fn program_error(error: acme_program::AcmeError) -> ProgramError {
    error.into()
}
