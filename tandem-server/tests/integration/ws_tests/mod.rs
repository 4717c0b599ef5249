mod test_invalid_frames_are_ignored;
