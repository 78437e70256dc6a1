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

use frame_support::traits::{Get, Time};
use sp_runtime::traits::{Saturating, Zero};

use pallet_staking_pool_runtime_api::UserStakingInfo;

use crate::{
	traits::RewardVault,
	types::{AccountIdOf, BalanceOf, MomentOf, WithdrawalStatus},
	Config, DistributedIncome, Pallet, Stakes, TotalStaked,
};

impl<T: Config> Pallet<T> {
	/// The amount currently staked by `who`, zero for unknown accounts.
	pub fn staked_amount(who: &AccountIdOf<T>) -> BalanceOf<T> {
		Stakes::<T>::get(who).map(|entry| entry.amount).unwrap_or_else(Zero::zero)
	}

	/// The current withdrawal state of `who`, derived from the recorded
	/// request timestamp and the clock.
	pub fn withdrawal_status(who: &AccountIdOf<T>) -> WithdrawalStatus<MomentOf<T>> {
		Stakes::<T>::get(who)
			.map(|entry| entry.withdrawal_status(T::Clock::now(), T::MinWithdrawDelay::get()))
			.unwrap_or(WithdrawalStatus::NoRequest)
	}

	/// Time left until a pending withdrawal of `who` becomes executable.
	/// `None` without a pending request.
	pub fn remaining_withdrawal_wait(who: &AccountIdOf<T>) -> Option<MomentOf<T>> {
		Stakes::<T>::get(who)
			.and_then(|entry| entry.remaining_withdrawal_wait(T::Clock::now(), T::MinWithdrawDelay::get()))
	}

	/// Time left until the next claim of `who` is permitted. Unknown
	/// accounts get the full delay, since their cooldown starts with their
	/// first stake.
	pub fn remaining_claim_wait(who: &AccountIdOf<T>) -> MomentOf<T> {
		Stakes::<T>::get(who)
			.map(|entry| entry.remaining_claim_wait(T::Clock::now(), T::MinClaimDelay::get()))
			.unwrap_or_else(T::MinClaimDelay::get)
	}

	/// Estimate of the reward `who` could claim right now, ignoring the
	/// claim cooldown. Returns zero if the vault cannot be queried, since a
	/// read-only query must not fail.
	///
	/// At least used in the runtime API.
	pub fn claimable_reward(who: &AccountIdOf<T>) -> BalanceOf<T> {
		let amount = Self::staked_amount(who);
		let total = TotalStaked::<T>::get();
		if amount.is_zero() || total.is_zero() {
			return Zero::zero();
		}

		let Ok(available) = T::RewardVault::total_available() else {
			return Zero::zero();
		};
		let new_income = available.saturating_sub(DistributedIncome::<T>::get());

		Self::pro_rata_share(new_income, amount, total).unwrap_or_else(|_| Zero::zero())
	}

	/// Aggregate staking information for `who`, with the wait-time defaults
	/// a fresh account reports: the full configured delays and zero
	/// balances.
	///
	/// At least used in the runtime API.
	pub fn user_staking(who: &AccountIdOf<T>) -> UserStakingInfo<BalanceOf<T>, MomentOf<T>> {
		let withdrawal_wait =
			Self::remaining_withdrawal_wait(who).unwrap_or_else(T::MinWithdrawDelay::get);

		UserStakingInfo {
			staked_amount: Self::staked_amount(who),
			withdrawal_wait,
			claim_wait: Self::remaining_claim_wait(who),
			claimable_reward: Self::claimable_reward(who),
		}
	}
}
