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

//! Benchmarking

use frame_benchmarking::v2::*;
use frame_support::{
	assert_ok,
	traits::{fungible::Mutate, Get, Time},
};
use frame_system::RawOrigin;
use sp_runtime::traits::{Saturating, Zero};

use crate::{
	types::{BalanceOf, MomentOf},
	Call, Config, Pallet, Stakes,
};

const STAKE_AMOUNT: u32 = 1_000_000;

// The pallet only reads the clock, so the benchmarks drive it through the
// timestamp pallet backing `Config::Clock`.
#[benchmarks(
	where
		T: pallet_timestamp::Config<Moment = MomentOf<T>>,
)]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn stake() {
		let caller: T::AccountId = whitelisted_caller();
		let amount: BalanceOf<T> = STAKE_AMOUNT.into();
		T::Currency::set_balance(&caller, amount.saturating_mul(2u32.into()));

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()), amount);

		assert_eq!(Pallet::<T>::staked_amount(&caller), amount);
	}

	#[benchmark]
	fn request_withdrawal() {
		let caller: T::AccountId = whitelisted_caller();
		let amount: BalanceOf<T> = STAKE_AMOUNT.into();
		T::Currency::set_balance(&caller, amount.saturating_mul(2u32.into()));
		assert_ok!(Pallet::<T>::stake(RawOrigin::Signed(caller.clone()).into(), amount));

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()));

		let entry = Stakes::<T>::get(&caller).expect("Stake entry should exist.");
		assert!(entry.withdrawal_requested_at.is_some());
	}

	#[benchmark]
	fn withdraw() {
		let caller: T::AccountId = whitelisted_caller();
		let amount: BalanceOf<T> = STAKE_AMOUNT.into();
		T::Currency::set_balance(&caller, amount.saturating_mul(2u32.into()));
		assert_ok!(Pallet::<T>::stake(RawOrigin::Signed(caller.clone()).into(), amount));
		assert_ok!(Pallet::<T>::request_withdrawal(RawOrigin::Signed(caller.clone()).into()));

		let unlocked_at = T::Clock::now().saturating_add(T::MinWithdrawDelay::get());
		pallet_timestamp::Now::<T>::put(unlocked_at);

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()), amount);

		assert!(Pallet::<T>::staked_amount(&caller).is_zero());
	}

	#[benchmark]
	fn claim() {
		let caller: T::AccountId = whitelisted_caller();
		let amount: BalanceOf<T> = STAKE_AMOUNT.into();
		T::Currency::set_balance(&caller, amount.saturating_mul(2u32.into()));
		assert_ok!(Pallet::<T>::stake(RawOrigin::Signed(caller.clone()).into(), amount));

		let claimable_at = T::Clock::now().saturating_add(T::MinClaimDelay::get());
		pallet_timestamp::Now::<T>::put(claimable_at);

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()));

		let entry = Stakes::<T>::get(&caller).expect("Stake entry should exist.");
		assert_eq!(entry.last_claim_at, claimable_at);
	}

	impl_benchmark_test_suite!(
		Pallet,
		crate::mock::ExtBuilder::default().build(),
		crate::mock::Test
	);
}
