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

use frame_support::traits::{fungible::Inspect, Time};
use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_arithmetic::traits::{BaseArithmetic, Zero};
use sp_runtime::RuntimeDebug;

use crate::Config;

pub type AccountIdOf<T> = <T as frame_system::Config>::AccountId;
pub type CurrencyOf<T> = <T as Config>::Currency;
pub type BalanceOf<T> = <CurrencyOf<T> as Inspect<AccountIdOf<T>>>::Balance;
pub type MomentOf<T> = <<T as Config>::Clock as Time>::Moment;
pub type StakeEntryOf<T> = StakeEntry<BalanceOf<T>, MomentOf<T>>;

/// The per-participant withdrawal state machine.
///
/// `request_withdrawal` moves an entry from `NoRequest` to `RequestPending`
/// (re-arming an already pending request restarts the cooldown). Once the
/// withdrawal delay has elapsed the entry is `Withdrawable`, and executing
/// the withdrawal returns it to `NoRequest`. The state is never stored; it
/// is derived from the recorded request timestamp and the current clock
/// reading.
#[derive(Clone, Copy, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, RuntimeDebug)]
pub enum WithdrawalStatus<Moment> {
	/// No withdrawal has been requested.
	NoRequest,
	/// A withdrawal was requested and the cooldown is still running.
	RequestPending {
		/// The instant from which the withdrawal can be executed.
		available_at: Moment,
	},
	/// The cooldown has elapsed; the stake can be withdrawn.
	Withdrawable,
}

/// The record kept for each participant of the pool.
///
/// Created lazily on the first stake and never removed; an entry whose
/// `amount` dropped to zero stays addressable but contributes nothing to
/// pro-rata shares.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, RuntimeDebug)]
pub struct StakeEntry<Balance, Moment> {
	/// The amount of the stake asset the participant has deposited.
	pub amount: Balance,
	/// The instant of the last (possibly re-armed) withdrawal request.
	pub withdrawal_requested_at: Option<Moment>,
	/// The instant from which the claim cooldown is measured. Set on first
	/// stake and advanced by every claim, including zero-payout claims.
	pub last_claim_at: Moment,
}

impl<Balance, Moment> StakeEntry<Balance, Moment>
where
	Balance: Zero + Copy,
	Moment: BaseArithmetic + Copy,
{
	pub fn new(now: Moment) -> Self {
		StakeEntry {
			amount: Balance::zero(),
			withdrawal_requested_at: None,
			last_claim_at: now,
		}
	}

	pub fn withdrawal_status(&self, now: Moment, delay: Moment) -> WithdrawalStatus<Moment> {
		match self.withdrawal_requested_at {
			None => WithdrawalStatus::NoRequest,
			Some(requested_at) if now.saturating_sub(requested_at) >= delay => WithdrawalStatus::Withdrawable,
			Some(requested_at) => WithdrawalStatus::RequestPending {
				available_at: requested_at.saturating_add(delay),
			},
		}
	}

	pub fn can_claim(&self, now: Moment, delay: Moment) -> bool {
		now.saturating_sub(self.last_claim_at) >= delay
	}

	/// Time left until a pending withdrawal becomes executable. `None` if no
	/// withdrawal has been requested, zero if it is already executable.
	pub fn remaining_withdrawal_wait(&self, now: Moment, delay: Moment) -> Option<Moment> {
		self.withdrawal_requested_at
			.map(|requested_at| requested_at.saturating_add(delay).saturating_sub(now))
	}

	/// Time left until the next claim is permitted, zero once claimable.
	pub fn remaining_claim_wait(&self, now: Moment, delay: Moment) -> Moment {
		self.last_claim_at.saturating_add(delay).saturating_sub(now)
	}
}
