#[cfg(target_os = "solana")]
use pinocchio::syscalls::sol_memcmp_;
use pinocchio::{
    account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey, ProgramResult,
};

#[allow(unused_imports)]
use std::mem::MaybeUninit;

#[inline(always)]
#[cfg(target_os = "solana")]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    if left.len() != len || right.len() != len {
        return false;
    }
    unsafe {
        let mut result = MaybeUninit::<i32>::uninit();
        sol_memcmp_(
            left.as_ptr(),
            right.as_ptr(),
            len as u64,
            result.as_mut_ptr() as *mut i32,
        );
        result.assume_init() == 0
    }
}

#[cfg(not(target_os = "solana"))]
pub fn sol_assert_bytes_eq(left: &[u8], right: &[u8], len: usize) -> bool {
    left.len() == len && right.len() == len && left == right
}

macro_rules! sol_assert {
  ($func_name:ident, $($param:ident: $type:ty),* $(,)? | $check:expr) => {
      #[inline(always)]
      pub fn $func_name<E: Into<ProgramError>>($($param: $type,)* error: E) -> ProgramResult {
          if $check {
              Ok(())
          } else {
              Err(error.into())
          }
      }
  };
}

sol_assert!(check_writable, account: &AccountInfo |
  account.is_writable()
);

sol_assert!(check_signer, account: &AccountInfo |
  account.is_signer()
);

sol_assert!(check_key_match, account: &AccountInfo, target_key: &Pubkey |
  sol_assert_bytes_eq(account.key().as_ref(), target_key.as_ref(), 32)
);

sol_assert!(check_owned_by, account: &AccountInfo, program_id: &Pubkey |
  account.is_owned_by(program_id)
);

sol_assert!(check_nonzero_key, key: &Pubkey |
  key.iter().any(|byte| *byte != 0)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_eq_requires_matching_length() {
        assert!(sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 3], 3));
        assert!(!sol_assert_bytes_eq(&[1, 2, 3], &[1, 2, 4], 3));
        assert!(!sol_assert_bytes_eq(&[1, 2], &[1, 2], 3));
    }

    #[test]
    fn test_plain_checks_map_errors() {
        assert!(check_nonzero_key(&[1u8; 32], ProgramError::InvalidArgument).is_ok());
        assert_eq!(
            check_nonzero_key(&[0u8; 32], ProgramError::InvalidArgument),
            Err(ProgramError::InvalidArgument)
        );
    }
}
