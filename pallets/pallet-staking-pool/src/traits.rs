// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

use sp_runtime::RuntimeDebug;

/// Failures the reward vault can report. The pallet maps them onto its own
/// error variants; a failing vault call aborts the whole claim without any
/// state change.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum VaultError {
	/// The vault could not be queried or returned an invalid value.
	Unavailable,
	/// Moving the reward asset out of the vault failed.
	PayoutFailed,
}

/// The external source of reward income.
///
/// The vault reports the cumulative income ever made available to the pool
/// and executes payouts of the reward asset. The pallet treats successive
/// `total_available` readings as non-decreasing during correct operation but
/// makes no assumption about the cadence at which income arrives.
pub trait RewardVault<AccountId, Balance> {
	/// Cumulative reward income ever made available for distribution.
	fn total_available() -> Result<Balance, VaultError>;

	/// Pay `amount` of the reward asset out of the vault to `beneficiary`.
	fn payout(beneficiary: &AccountId, amount: Balance) -> Result<(), VaultError>;
}
